//! Decryption terminal puzzle.
//!
//! The terminal shows a short pseudocode listing with four faulty lines.
//! The player enters the four faulty line numbers, in order, as a single
//! four-digit sequence.

use tracing::info;

use crate::rng::Rng;

/// Digits in a sequence.
pub const SEQUENCE_LEN: usize = 4;

/// One terminal listing. `sequence` holds the faulty line numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pseudocode {
    pub sequence: &'static str,
    pub description: &'static str,
    pub algorithm: &'static str,
}

pub const PSEUDOCODES: &[Pseudocode] = &[
    Pseudocode {
        sequence: "2357",
        description: "Return the largest value in a non-empty list.",
        algorithm: "\
1 function max(list):
2   best = 0
3   for i = 1 to length(list):
4     item = list[i]
5     if item < best:
6       continue
7     best = i
8   return best",
    },
    Pseudocode {
        sequence: "1468",
        description: "Sum every even number from 0 up to n.",
        algorithm: "\
1 function sumEven(n)
2   total = 0
3   i = 0
4   while i < n:
5     total = total + i
6     i = i + 1
7   end while
8   return i",
    },
    Pseudocode {
        sequence: "3458",
        description: "Reverse a string.",
        algorithm: "\
1 function reverse(text):
2   result = \"\"
3   for i = 0 to length(text):
4     result = text[i] + text
5     i = i + 1
6   end for
7   // result now holds the reversed text
8   return text",
    },
    Pseudocode {
        sequence: "2467",
        description: "Count how many times `target` appears in a list.",
        algorithm: "\
1 function count(list, target):
2   count = 1
3   for each item in list:
4     if item = count:
5       continue
6     count = count - 1
7   return target
8   end for",
    },
];

/// Validated sequence attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct Attempt(pub String);

/// Extract a sequence attempt from free text.
///
/// The text counts as an attempt when it holds exactly four digits and
/// they are adjacent. Anything else is chat.
pub fn parse_attempt(input: &str) -> Option<Attempt> {
    let digits = input.chars().filter(|c| c.is_ascii_digit()).count();
    if digits != SEQUENCE_LEN {
        return None;
    }
    let start = input.find(|c: char| c.is_ascii_digit())?;
    let run: String = input[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if run.len() == SEQUENCE_LEN {
        Some(Attempt(run))
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptResult {
    Correct,
    Incorrect,
    /// Puzzle was already solved; the attempt changes nothing.
    AlreadySolved,
}

pub struct DecryptionPuzzle {
    entry: &'static Pseudocode,
    #[cfg(test)]
    index: usize,
    hint_index: usize,
    last_attempt: Option<String>,
    solved: bool,
}

impl DecryptionPuzzle {
    /// Pick a random listing.
    pub fn random(rng: &mut Rng) -> Self {
        Self::with_index(rng.below(PSEUDOCODES.len()))
    }

    /// Listing by table index; out-of-range indices wrap.
    pub fn with_index(index: usize) -> Self {
        let index = index % PSEUDOCODES.len();
        info!(index, "decryption listing chosen");
        Self {
            entry: &PSEUDOCODES[index],
            #[cfg(test)]
            index,
            hint_index: 0,
            last_attempt: None,
            solved: false,
        }
    }

    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entry(&self) -> &'static Pseudocode {
        self.entry
    }

    /// Description and listing as one block, as sent to the assistant.
    pub fn pseudocode(&self) -> String {
        format!("{}\n{}", self.entry.description, self.entry.algorithm)
    }

    pub fn submit(&mut self, attempt: &Attempt) -> AttemptResult {
        if self.solved {
            return AttemptResult::AlreadySolved;
        }
        self.last_attempt = Some(attempt.0.clone());
        if attempt.0 == self.entry.sequence {
            self.solved = true;
            info!("decryption solved");
            AttemptResult::Correct
        } else {
            AttemptResult::Incorrect
        }
    }

    /// Next faulty line to hint at. Cycles through the sequence.
    pub fn next_hint_line(&mut self) -> u32 {
        let digit = self
            .entry
            .sequence
            .as_bytes()
            .get(self.hint_index)
            .map(|b| (b - b'0') as u32)
            .unwrap_or(0);
        self.hint_index = (self.hint_index + 1) % SEQUENCE_LEN;
        digit
    }

    pub fn last_attempt(&self) -> Option<&str> {
        self.last_attempt.as_deref()
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_entries_are_well_formed() {
        for entry in PSEUDOCODES {
            assert_eq!(entry.sequence.len(), SEQUENCE_LEN);
            let lines = entry.algorithm.lines().count() as u32;
            for c in entry.sequence.chars() {
                let n = c.to_digit(10).unwrap();
                assert!(n >= 1 && n <= lines, "line {} outside listing", n);
            }
        }
    }

    #[test]
    fn parse_plain_sequence() {
        assert_eq!(parse_attempt("2357"), Some(Attempt("2357".into())));
        assert_eq!(
            parse_attempt("I think it is 2357!"),
            Some(Attempt("2357".into()))
        );
    }

    #[test]
    fn parse_rejects_wrong_digit_count() {
        assert_eq!(parse_attempt("235"), None);
        assert_eq!(parse_attempt("23571"), None);
        assert_eq!(parse_attempt("what is line 3?"), None);
    }

    #[test]
    fn parse_rejects_split_digits() {
        assert_eq!(parse_attempt("23 57"), None);
        assert_eq!(parse_attempt("line 2, 3, 5 and 7"), None);
    }

    #[test]
    fn correct_attempt_solves() {
        let mut p = DecryptionPuzzle::with_index(0);
        assert_eq!(p.submit(&Attempt("1111".into())), AttemptResult::Incorrect);
        assert!(!p.is_solved());
        assert_eq!(p.submit(&Attempt("2357".into())), AttemptResult::Correct);
        assert!(p.is_solved());
        assert_eq!(p.last_attempt(), Some("2357"));
        assert_eq!(
            p.submit(&Attempt("0000".into())),
            AttemptResult::AlreadySolved
        );
        assert_eq!(p.last_attempt(), Some("2357"));
    }

    #[test]
    fn hints_cycle_through_sequence() {
        let mut p = DecryptionPuzzle::with_index(1);
        let lines: Vec<u32> = (0..6).map(|_| p.next_hint_line()).collect();
        assert_eq!(lines, vec![1, 4, 6, 8, 1, 4]);
    }

    #[test]
    fn random_pick_is_seeded() {
        let a = DecryptionPuzzle::random(&mut Rng::new(77)).index();
        let b = DecryptionPuzzle::random(&mut Rng::new(77)).index();
        assert_eq!(a, b);
        assert!(a < PSEUDOCODES.len());
    }

    #[test]
    fn index_wraps() {
        assert_eq!(DecryptionPuzzle::with_index(PSEUDOCODES.len() + 1).index(), 1);
    }
}
