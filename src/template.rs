use std::fmt;
use std::iter::once;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BrillError, Result};

/// Contextual pattern a transformation rule can be conditioned on.
///
/// A template looks at the tags or words at fixed positions relative to the
/// word being retagged. Templates whose name ends in `TAG` look at tags only,
/// those ending in `WD` or `BIGRAM` also look at words.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleTemplate {
    /// The next word is tagged `a`.
    #[serde(rename = "NEXT-TAG")]
    NextTag,
    /// The previous word is tagged `a`.
    #[serde(rename = "PREV-TAG")]
    PrevTag,
    /// One of the three previous words is tagged `a`.
    #[serde(rename = "PREV-1-OR-2-OR-3-TAG")]
    Prev1Or2Or3Tag,
    /// One of the two previous words is tagged `a`.
    #[serde(rename = "PREV-1-OR-2-TAG")]
    Prev1Or2Tag,
    /// One of the two next words is tagged `a`.
    #[serde(rename = "NEXT1OR2TAG")]
    Next1Or2Tag,
    /// One of the three next words is tagged `a`.
    #[serde(rename = "NEXT1OR2OR3TAG")]
    Next1Or2Or3Tag,
    /// The previous word is tagged `a` and the next one `b`.
    #[serde(rename = "SURROUNDTAG")]
    SurroundTag,
    /// The word two before is tagged `a`.
    #[serde(rename = "PREV2TAG")]
    Prev2Tag,
    /// The word two after is tagged `a`.
    #[serde(rename = "NEXT2TAG")]
    Next2Tag,
    /// The previous word is `a`.
    #[serde(rename = "PREVWD")]
    PrevWd,
    /// The next word is `a`.
    #[serde(rename = "NEXTWD")]
    NextWd,
    /// The current word is `a`.
    #[serde(rename = "CURWD")]
    CurWd,
    /// One of the two previous words is `a`.
    #[serde(rename = "PREV1OR2WD")]
    Prev1Or2Wd,
    /// One of the two next words is `a`.
    #[serde(rename = "NEXT1OR2WD")]
    Next1Or2Wd,
    /// The word two before is `a`.
    #[serde(rename = "PREV2WD")]
    Prev2Wd,
    /// The word two after is `a`.
    #[serde(rename = "NEXT2WD")]
    Next2Wd,
    /// The previous word is tagged `a` and the current word is `b`.
    #[serde(rename = "WDPREVTAG")]
    WdPrevTag,
    /// The current word is `a` and the next word is tagged `b`.
    #[serde(rename = "WDNEXTTAG")]
    WdNextTag,
    /// The two previous words are tagged `a` and `b`.
    #[serde(rename = "PREVBIGRAM")]
    PrevBigram,
    /// The two next words are tagged `a` and `b`.
    #[serde(rename = "NEXTBIGRAM")]
    NextBigram,
    /// The previous word is `a` and the current word is `b`.
    #[serde(rename = "LBIGRAM")]
    LBigram,
    /// The current word is `a` and the next word is `b`.
    #[serde(rename = "RBIGRAM")]
    RBigram,
}

use RuleTemplate::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Source {
    Tag,
    Word,
}

/// One condition of a template: the tag or word at any of `offsets` equals a parameter.
#[derive(Debug)]
struct Slot {
    source: Source,
    offsets: &'static [isize],
}

impl Slot {
    fn value_at<'s, W, T>(
        &self,
        words: &'s [W],
        tags: &'s [T],
        i: usize,
        offset: isize,
    ) -> Option<&'s str>
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        let j = if offset < 0 {
            i.checked_sub(offset.unsigned_abs())?
        } else {
            i.checked_add(offset as usize)?
        };
        match self.source {
            Source::Tag => tags.get(j).map(|t| t.as_ref()),
            Source::Word => words.get(j).map(|w| w.as_ref()),
        }
    }

    fn matches<W, T>(&self, words: &[W], tags: &[T], i: usize, param: &str) -> bool
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        self.offsets
            .iter()
            .any(|&offset| self.value_at(words, tags, i, offset) == Some(param))
    }
}

macro_rules! tag {
    ($($offset:expr),+) => {
        Slot { source: Source::Tag, offsets: &[$($offset),+] }
    };
}

macro_rules! word {
    ($($offset:expr),+) => {
        Slot { source: Source::Word, offsets: &[$($offset),+] }
    };
}

impl RuleTemplate {
    /// Templates that only look at tags, in catalog order.
    pub const TAG_TEMPLATES: [RuleTemplate; 9] = [
        NextTag,
        PrevTag,
        Prev1Or2Or3Tag,
        Prev1Or2Tag,
        Next1Or2Tag,
        Next1Or2Or3Tag,
        SurroundTag,
        Prev2Tag,
        Next2Tag,
    ];

    /// The whole catalog, tag templates first.
    pub const ALL: [RuleTemplate; 22] = [
        NextTag,
        PrevTag,
        Prev1Or2Or3Tag,
        Prev1Or2Tag,
        Next1Or2Tag,
        Next1Or2Or3Tag,
        SurroundTag,
        Prev2Tag,
        Next2Tag,
        PrevWd,
        NextWd,
        CurWd,
        Prev1Or2Wd,
        Next1Or2Wd,
        Prev2Wd,
        Next2Wd,
        WdPrevTag,
        WdNextTag,
        PrevBigram,
        NextBigram,
        LBigram,
        RBigram,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NextTag => "NEXT-TAG",
            PrevTag => "PREV-TAG",
            Prev1Or2Or3Tag => "PREV-1-OR-2-OR-3-TAG",
            Prev1Or2Tag => "PREV-1-OR-2-TAG",
            Next1Or2Tag => "NEXT1OR2TAG",
            Next1Or2Or3Tag => "NEXT1OR2OR3TAG",
            SurroundTag => "SURROUNDTAG",
            Prev2Tag => "PREV2TAG",
            Next2Tag => "NEXT2TAG",
            PrevWd => "PREVWD",
            NextWd => "NEXTWD",
            CurWd => "CURWD",
            Prev1Or2Wd => "PREV1OR2WD",
            Next1Or2Wd => "NEXT1OR2WD",
            Prev2Wd => "PREV2WD",
            Next2Wd => "NEXT2WD",
            WdPrevTag => "WDPREVTAG",
            WdNextTag => "WDNEXTTAG",
            PrevBigram => "PREVBIGRAM",
            NextBigram => "NEXTBIGRAM",
            LBigram => "LBIGRAM",
            RBigram => "RBIGRAM",
        }
    }

    /// Number of parameters a rule built from this template binds.
    pub fn arity(self) -> usize {
        self.slots().len()
    }

    fn slots(self) -> &'static [Slot] {
        match self {
            NextTag => &[tag!(1)],
            PrevTag => &[tag!(-1)],
            Prev1Or2Or3Tag => &[tag!(-1, -2, -3)],
            Prev1Or2Tag => &[tag!(-1, -2)],
            Next1Or2Tag => &[tag!(1, 2)],
            Next1Or2Or3Tag => &[tag!(1, 2, 3)],
            SurroundTag => &[tag!(-1), tag!(1)],
            Prev2Tag => &[tag!(-2)],
            Next2Tag => &[tag!(2)],
            PrevWd => &[word!(-1)],
            NextWd => &[word!(1)],
            CurWd => &[word!(0)],
            Prev1Or2Wd => &[word!(-1, -2)],
            Next1Or2Wd => &[word!(1, 2)],
            Prev2Wd => &[word!(-2)],
            Next2Wd => &[word!(2)],
            WdPrevTag => &[tag!(-1), word!(0)],
            WdNextTag => &[word!(0), tag!(1)],
            PrevBigram => &[tag!(-2), tag!(-1)],
            NextBigram => &[tag!(1), tag!(2)],
            LBigram => &[word!(-1), word!(0)],
            RBigram => &[word!(0), word!(1)],
        }
    }

    /// Contexts observed around position `i`, one per distinct parameter binding.
    ///
    /// Positions beyond the sentence boundaries contribute nothing, so a
    /// template may propose no context at all.
    pub fn contexts<'s, W, T>(
        self,
        words: &'s [W],
        tags: &'s [T],
        i: usize,
    ) -> Vec<Context<&'s str>>
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        match self.slots() {
            [slot] => {
                let mut contexts: Vec<Context<&str>> = Vec::with_capacity(slot.offsets.len());
                for &offset in slot.offsets {
                    if let Some(value) = slot.value_at(words, tags, i, offset) {
                        let context = Context::single(value);
                        if !contexts.contains(&context) {
                            contexts.push(context);
                        }
                    }
                }
                contexts
            }
            [first, second] => first
                .value_at(words, tags, i, first.offsets[0])
                .zip(second.value_at(words, tags, i, second.offsets[0]))
                .map(|(a, b)| Context::pair(a, b))
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether `context` holds around position `i`.
    pub fn holds<W, T>(self, words: &[W], tags: &[T], i: usize, context: &Context<&str>) -> bool
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        let slots = self.slots();
        slots.len() == context.arity()
            && slots
                .iter()
                .zip(context.params())
                .all(|(slot, param)| slot.matches(words, tags, i, param))
    }
}

impl fmt::Display for RuleTemplate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleTemplate {
    type Err = BrillError;

    fn from_str(s: &str) -> Result<Self> {
        let template = match s {
            "PREVTAG" => PrevTag,
            "NEXTTAG" => NextTag,
            "PREV1OR2TAG" => Prev1Or2Tag,
            "PREV1OR2OR3TAG" => Prev1Or2Or3Tag,
            _ => *Self::ALL
                .iter()
                .find(|template| template.name() == s)
                .ok_or_else(|| BrillError::UnknownTemplate(s.to_owned()))?,
        };
        Ok(template)
    }
}

/// Parameters bound by a rule: one value, or two for two-slot templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context<S> {
    pub first: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<S>,
}

impl<S> Context<S> {
    pub fn single(first: S) -> Self {
        Self {
            first,
            second: None,
        }
    }

    pub fn pair(first: S, second: S) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    pub fn arity(&self) -> usize {
        1 + self.second.iter().count()
    }
}

impl<'s> Context<&'s str> {
    fn params(&self) -> impl Iterator<Item = &'s str> {
        once(self.first).chain(self.second)
    }

    pub fn into_owned(self) -> Context<String> {
        Context {
            first: self.first.to_owned(),
            second: self.second.map(str::to_owned),
        }
    }
}

impl Context<String> {
    pub fn as_deref(&self) -> Context<&str> {
        Context {
            first: &self.first,
            second: self.second.as_deref(),
        }
    }
}
