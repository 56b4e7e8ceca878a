use std::fmt;

use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::from_str;

use crate::error::{TfResult, TypeForgeError};

static CORPUS_DIR: Dir = include_dir!("src/corpus");

const WORD_LIST_FILE: &str = "english.json";
const SNIPPETS_FILE: &str = "snippets.json";

#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

/// A block of code to be typed verbatim
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Snippet {
    pub language: String,
    pub code: String,
}

/// Source of target text for a session
pub trait ContentProvider: fmt::Debug {
    fn generate_words(&self, count: usize) -> Vec<String>;
    fn random_snippet(&self) -> Snippet;
}

/// Random words and snippets from the corpus compiled into the binary
#[derive(Debug, Clone)]
pub struct CorpusProvider {
    words: WordList,
    snippets: Vec<Snippet>,
}

impl CorpusProvider {
    pub fn embedded() -> TfResult<Self> {
        let words: WordList = read_corpus_file(WORD_LIST_FILE)?;
        let snippets: Vec<Snippet> = read_corpus_file(SNIPPETS_FILE)?;

        if words.words.is_empty() {
            return Err(TypeForgeError::Content(format!(
                "word list '{}' is empty",
                words.name
            )));
        }
        if snippets.is_empty() {
            return Err(TypeForgeError::Content("no code snippets available".into()));
        }

        tracing::debug!(
            word_list = %words.name,
            words = words.words.len(),
            snippets = snippets.len(),
            "loaded embedded corpus"
        );

        Ok(Self { words, snippets })
    }

    pub fn word_list(&self) -> &WordList {
        &self.words
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }
}

impl ContentProvider for CorpusProvider {
    fn generate_words(&self, count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        let mut out: Vec<String> = Vec::with_capacity(count);

        while out.len() < count {
            let Some(word) = self.words.words.choose(&mut rng) else {
                break;
            };
            // no immediate repeats, they read like a typo in the prompt
            if self.words.words.len() > 1 && out.last() == Some(word) {
                continue;
            }
            out.push(word.clone());
        }

        out
    }

    fn random_snippet(&self) -> Snippet {
        let mut rng = rand::thread_rng();
        self.snippets.choose(&mut rng).cloned().unwrap_or_default()
    }
}

/// Fixed content, used for custom prompts and in tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProvider {
    words: Vec<String>,
    snippet: Snippet,
}

impl StaticProvider {
    pub fn new(words: Vec<String>, snippet: Snippet) -> Self {
        Self { words, snippet }
    }

    /// Word modes get the prompt split on whitespace, code mode gets it verbatim
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            words: prompt.split_whitespace().map(str::to_string).collect(),
            snippet: Snippet {
                language: "text".to_string(),
                code: prompt.to_string(),
            },
        }
    }
}

impl ContentProvider for StaticProvider {
    /// The prompt is the whole test, so `count` is ignored
    fn generate_words(&self, _count: usize) -> Vec<String> {
        self.words.clone()
    }

    fn random_snippet(&self) -> Snippet {
        self.snippet.clone()
    }
}

/// The text of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetContent {
    Words(Vec<String>),
    Code(Snippet),
}

impl TargetContent {
    pub fn words(&self) -> Option<&[String]> {
        match self {
            TargetContent::Words(words) => Some(words),
            TargetContent::Code(_) => None,
        }
    }

    /// Full target text as the user would type it
    pub fn text(&self) -> String {
        match self {
            TargetContent::Words(words) => words.join(" "),
            TargetContent::Code(snippet) => snippet.code.clone(),
        }
    }

    pub fn char_len(&self) -> usize {
        match self {
            TargetContent::Words(words) => {
                words.iter().map(|w| w.chars().count()).sum::<usize>()
                    + words.len().saturating_sub(1)
            }
            TargetContent::Code(snippet) => snippet.code.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.char_len() == 0
    }
}

fn read_corpus_file<T: DeserializeOwned>(file_name: &str) -> TfResult<T> {
    let file = CORPUS_DIR
        .get_file(file_name)
        .ok_or_else(|| TypeForgeError::Content(format!("corpus file '{file_name}' not found")))?;

    let contents = file.contents_utf8().ok_or_else(|| {
        TypeForgeError::Content(format!("corpus file '{file_name}' is not valid UTF-8"))
    })?;

    Ok(from_str(contents)?)
}
