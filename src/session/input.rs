use crate::session::attempt::AttemptState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
}

/// One scored keystroke: what was pressed and whether it matched the target
/// at the position it landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: char,
    pub correct: bool,
}

/// Append a typed character. Correct iff the position is inside the target
/// and the target character there matches; anything past the target end is
/// incorrect.
pub fn process_char(attempt: &mut AttemptState, ch: char) -> KeyPress {
    let pos = attempt.typed.len();
    let correct = attempt.target.get(pos) == Some(&ch);

    attempt.typed.push(ch);
    attempt.statuses.push(if correct {
        CharStatus::Correct
    } else {
        CharStatus::Incorrect
    });

    let press = KeyPress { key: ch, correct };
    attempt.trace.push(press);
    press
}

/// Pop the buffer and its status together. The keystroke trace stays: the
/// heatmap remembers mistakes even after they are corrected.
pub fn process_backspace(attempt: &mut AttemptState) {
    if attempt.typed.pop().is_some() {
        attempt.statuses.pop();
    }
}
