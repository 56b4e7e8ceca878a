use crate::content::TargetContent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Untyped,
    Correct,
    Incorrect,
    /// typed past the end of the target word (or snippet)
    Extra,
    /// skipped in a word the user has already moved past
    Missed,
}

/// One position of the comparison between target and input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassifiedChar {
    pub expected: Option<char>,
    pub typed: Option<char>,
    pub class: CharClass,
}

impl ClassifiedChar {
    /// The character to show for this position
    pub fn display_char(&self) -> char {
        match self.class {
            CharClass::Extra => self.typed.unwrap_or(' '),
            _ => self.expected.or(self.typed).unwrap_or(' '),
        }
    }
}

/// A word in word modes, the whole snippet in code mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub chars: Vec<ClassifiedChar>,
    /// the user has moved past this segment
    pub finished: bool,
    /// the segment the cursor is in
    pub current: bool,
    /// typed with no target word to compare against
    pub overflow: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CharStats {
    pub correct: usize,
    pub incorrect: usize,
    pub extra: usize,
    pub missed: usize,
}

/// How target and input are cut into comparable pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segmentation {
    /// split on spaces, compare word by word
    WordDelimited,
    /// one positional comparison over the whole string
    WholeString,
}

impl Segmentation {
    pub fn for_target(target: &TargetContent) -> Self {
        match target {
            TargetContent::Words(_) => Segmentation::WordDelimited,
            TargetContent::Code(_) => Segmentation::WholeString,
        }
    }
}

/// Live classification is for rendering while typing. The final pass also
/// marks the unfilled tail of a snippet as missed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Live,
    Final,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub segmentation: Segmentation,
    pub segments: Vec<Segment>,
    /// spaces after finished words that have a target word
    pub completed_separators: usize,
}

impl Classification {
    pub fn char_stats(&self) -> CharStats {
        let mut stats = CharStats::default();
        for c in self.segments.iter().flat_map(|s| s.chars.iter()) {
            match c.class {
                CharClass::Correct => stats.correct += 1,
                CharClass::Incorrect => stats.incorrect += 1,
                CharClass::Extra => stats.extra += 1,
                CharClass::Missed => stats.missed += 1,
                CharClass::Untyped => {}
            }
        }
        stats
    }

    /// Correct positions plus the implicit correct space after each finished word
    pub fn correct_chars(&self) -> usize {
        self.char_stats().correct + self.completed_separators
    }
}

pub fn classify(target: &TargetContent, input: &str, pass: Pass) -> Classification {
    match target {
        TargetContent::Words(words) => classify_words(words, input),
        TargetContent::Code(snippet) => classify_whole(&snippet.code, input, pass),
    }
}

fn classify_words(words: &[String], input: &str) -> Classification {
    let typed: Vec<&str> = input.split(' ').collect();
    // split always yields at least one segment, the one being typed
    let current = typed.len() - 1;

    let mut segments = Vec::with_capacity(words.len().max(typed.len()));
    let mut completed_separators = 0;

    for (i, word) in words.iter().enumerate() {
        let finished = i < current;
        let chars = match typed.get(i) {
            Some(typed_word) => compare_positions(word, typed_word, finished),
            None => word
                .chars()
                .map(|c| ClassifiedChar {
                    expected: Some(c),
                    typed: None,
                    class: CharClass::Untyped,
                })
                .collect(),
        };
        if finished {
            completed_separators += 1;
        }
        segments.push(Segment {
            chars,
            finished,
            current: i == current,
            overflow: false,
        });
    }

    for (i, typed_word) in typed.iter().enumerate().skip(words.len()) {
        segments.push(Segment {
            chars: typed_word
                .chars()
                .map(|c| ClassifiedChar {
                    expected: None,
                    typed: Some(c),
                    class: CharClass::Extra,
                })
                .collect(),
            finished: i < current,
            current: i == current,
            overflow: true,
        });
    }

    Classification {
        segmentation: Segmentation::WordDelimited,
        segments,
        completed_separators,
    }
}

fn classify_whole(code: &str, input: &str, pass: Pass) -> Classification {
    let finished = pass == Pass::Final;
    Classification {
        segmentation: Segmentation::WholeString,
        segments: vec![Segment {
            chars: compare_positions(code, input, finished),
            finished,
            current: !finished,
            overflow: false,
        }],
        completed_separators: 0,
    }
}

fn compare_positions(expected: &str, typed: &str, finished: bool) -> Vec<ClassifiedChar> {
    let mut expected = expected.chars();
    let mut typed = typed.chars();
    let mut out = Vec::new();

    loop {
        let (e, t) = (expected.next(), typed.next());
        let class = match (e, t) {
            (None, None) => break,
            (Some(e), Some(t)) if e == t => CharClass::Correct,
            (Some(_), Some(_)) => CharClass::Incorrect,
            (None, Some(_)) => CharClass::Extra,
            (Some(_), None) if finished => CharClass::Missed,
            (Some(_), None) => CharClass::Untyped,
        };
        out.push(ClassifiedChar {
            expected: e,
            typed: t,
            class,
        });
    }

    out
}
