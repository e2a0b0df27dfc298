use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use std::ops::Range;
use time::{Date, Month};

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;

const YEAR_DIGITS: Range<usize> = 0..4;
const MONTH_DIGITS: Range<usize> = 4..6;
const DAY_DIGITS: Range<usize> = 6..8;
const DIGIT_COUNT: usize = 8;

/// Dialog for typing in a date to set as the calendar's reference date
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * .................
     * .┌─ Go To… ────┐.
     * .│             │.
     * .│  YYYY-MM-DD │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    negative: bool,
    digits: [Option<u8>; DIGIT_COUNT],
    filled: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line so that only "[ENTER]"
            // and not its centering padding is underlined
            Line::from(Span::styled(
                "[ENTER]",
                if self.filled == DIGIT_COUNT {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        )];
        for (i, dg) in self.digits.iter().enumerate() {
            if i == MONTH_DIGITS.start || i == DAY_DIGITS.start {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            spans.push(match dg {
                Some(d) => Span::styled(d.to_string(), BASE_STYLE),
                None => Span::styled(placeholder(i), UNFILLED_CELL_STYLE),
            });
        }
        Line::from_iter(spans)
    }

    fn number(&self, range: Range<usize>) -> u32 {
        self.digits[range]
            .iter()
            .map(|d| u32::from(d.unwrap_or(0)))
            .fold(0, |acc, d| acc * 10 + d)
    }

    fn to_date(self) -> Option<Date> {
        let year = i32::try_from(self.number(YEAR_DIGITS)).ok()?;
        let year = if self.negative { -year } else { year };
        let month = Month::try_from(u8::try_from(self.number(MONTH_DIGITS)).ok()?).ok()?;
        let day = u8::try_from(self.number(DAY_DIGITS)).ok()?;
        Date::from_calendar_date(year, month, day).ok()
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match input {
            JumpToInput::Negative if self.filled == 0 => {
                self.negative = !self.negative;
                JumpToOutput::Ok
            }
            JumpToInput::Positive if self.filled == 0 => {
                self.negative = false;
                JumpToOutput::Ok
            }
            JumpToInput::Digit(d) if self.filled < DIGIT_COUNT && d < 10 => {
                self.digits[self.filled] = Some(d);
                self.filled += 1;
                JumpToOutput::Ok
            }
            JumpToInput::Backspace if self.filled > 0 => {
                self.filled -= 1;
                self.digits[self.filled] = None;
                JumpToOutput::Ok
            }
            JumpToInput::Enter if self.filled == DIGIT_COUNT => match self.to_date() {
                Some(date) => JumpToOutput::Jump(date),
                None => JumpToOutput::Invalid,
            },
            _ => JumpToOutput::Invalid,
        }
    }
}

fn placeholder(i: usize) -> &'static str {
    if YEAR_DIGITS.contains(&i) {
        "Y"
    } else if MONTH_DIGITS.contains(&i) {
        "M"
    } else {
        "D"
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump(Date),
}
