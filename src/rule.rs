use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BrillError, Result};
use crate::template::{Context, RuleTemplate};

/// A transformation: change `from_tag` into `to_tag` wherever `context` holds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    from_tag: String,
    to_tag: String,
    template: RuleTemplate,
    context: Context<String>,
}

impl Rule {
    pub fn new<F, T>(
        from_tag: F,
        to_tag: T,
        template: RuleTemplate,
        context: Context<String>,
    ) -> Result<Self>
    where
        F: Into<String>,
        T: Into<String>,
    {
        if template.arity() != context.arity() {
            return Err(BrillError::invalid_argument(
                "context",
                format!(
                    "{} takes {} parameter(s), got {}",
                    template,
                    template.arity(),
                    context.arity()
                ),
            ));
        }

        Ok(Self {
            from_tag: from_tag.into(),
            to_tag: to_tag.into(),
            template,
            context,
        })
    }

    pub fn from_tag(&self) -> &str {
        &self.from_tag
    }

    pub fn to_tag(&self) -> &str {
        &self.to_tag
    }

    pub fn template(&self) -> RuleTemplate {
        self.template
    }

    pub fn context(&self) -> &Context<String> {
        &self.context
    }

    pub fn applies_at<W, T>(&self, words: &[W], tags: &[T], i: usize) -> bool
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        tags.get(i).map_or(false, |tag| tag.as_ref() == self.from_tag)
            && self
                .template
                .holds(words, tags, i, &self.context.as_deref())
    }

    /// Positions of a sentence this rule fires at, judged on the tags as they are now.
    pub fn positions<W, T>(&self, words: &[W], tags: &[T]) -> Vec<usize>
    where
        W: AsRef<str>,
        T: AsRef<str>,
    {
        (0..tags.len())
            .filter(|&i| self.applies_at(words, tags, i))
            .collect()
    }

    /// Rewrite the tags of one sentence and return the number of changed tags.
    ///
    /// All firing positions are found before any tag is changed, so a rewrite
    /// never enables or disables the rule elsewhere in the same sentence.
    pub fn apply<'r, W>(&'r self, words: &[W], tags: &mut [&'r str]) -> usize
    where
        W: AsRef<str>,
    {
        let positions = self.positions(words, &*tags);
        for &i in &positions {
            tags[i] = self.to_tag.as_str();
        }
        positions.len()
    }
}

/// Brill's contextual rule notation: `FROM TO TEMPLATE A [B]`.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.from_tag, self.to_tag, self.template, self.context.first
        )?;
        if let Some(second) = &self.context.second {
            write!(f, " {}", second)?;
        }
        Ok(())
    }
}

impl FromStr for Rule {
    type Err = BrillError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<_> = s.split_whitespace().collect();
        let context = match fields[..] {
            [_, _, _, first] => Context::single(first),
            [_, _, _, first, second] => Context::pair(first, second),
            _ => return Err(BrillError::ParseRule(s.to_owned())),
        };
        let template: RuleTemplate = fields[2].parse()?;

        Self::new(fields[0], fields[1], template, context.into_owned())
            .map_err(|_| BrillError::ParseRule(s.to_owned()))
    }
}

/// Rules in the order they were learned, which is the order they are applied in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn nr_rules(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<Rule> {
        self.rules.iter()
    }

    /// Apply every rule, in order, to the tags of one sentence.
    ///
    /// Each rule is applied to the whole sentence before the next one starts.
    pub fn apply<'r, W>(&'r self, words: &[W], tags: &mut [&'r str])
    where
        W: AsRef<str>,
    {
        for rule in &self.rules {
            rule.apply(words, tags);
        }
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// One rule per line.
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// Parses one rule per line; blank lines and lines starting with `#` are skipped.
impl FromStr for RuleSet {
    type Err = BrillError;

    fn from_str(s: &str) -> Result<Self> {
        s.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::parse)
            .collect::<Result<Vec<Rule>>>()
            .map(RuleSet::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(text: &str) -> Rule {
        text.parse().unwrap()
    }

    #[test]
    fn parses_and_displays_brill_notation() {
        let rule = rule("NN  VB PREV-TAG TO");
        assert_eq!(rule.from_tag(), "NN");
        assert_eq!(rule.to_tag(), "VB");
        assert_eq!(rule.template(), RuleTemplate::PrevTag);
        assert_eq!(rule.context().as_deref(), Context::single("TO"));
        assert_eq!(rule.to_string(), "NN VB PREV-TAG TO");

        let surround = self::rule("VBN VBD SURROUNDTAG NP AT");
        assert_eq!(surround.context().as_deref(), Context::pair("NP", "AT"));
        assert_eq!(surround.to_string(), "VBN VBD SURROUNDTAG NP AT");
    }

    #[test]
    fn rejects_malformed_rules() {
        for text in &["NN VB", "NN VB PREV-TAG", "NN VB SURROUNDTAG TO", "NN VB PREV-TAG TO AT"] {
            assert_eq!(
                text.parse::<Rule>().unwrap_err(),
                BrillError::ParseRule(text.to_string())
            );
        }
        assert_eq!(
            "NN VB FOO TO".parse::<Rule>().unwrap_err(),
            BrillError::UnknownTemplate("FOO".to_owned())
        );
    }

    #[test]
    fn new_checks_arity() {
        let err = Rule::new("NN", "VB", RuleTemplate::SurroundTag, Context::single("TO".into()))
            .unwrap_err();
        assert!(matches!(err, BrillError::InvalidArgument { .. }));
    }

    #[test]
    fn applies_only_to_from_tag_in_context() {
        let rule = rule("NN VB PREV-TAG TO");
        let words = ["to", "run", "the", "run"];
        let mut tags = vec!["TO", "NN", "AT", "NN"];
        assert_eq!(rule.apply(&words, &mut tags), 1);
        assert_eq!(tags, ["TO", "VB", "AT", "NN"]);
    }

    #[test]
    fn rewrites_are_not_seen_by_the_same_rule() {
        // every NN after an NN becomes VB; the second NN must not block the third
        let rule = rule("NN VB PREV-TAG NN");
        let words = ["a", "b", "c"];
        let mut tags = vec!["NN", "NN", "NN"];
        assert_eq!(rule.apply(&words, &mut tags), 2);
        assert_eq!(tags, ["NN", "VB", "VB"]);
    }

    #[test]
    fn rule_order_matters() {
        let first = rule("NN VB PREV-TAG TO");
        let second = rule("VB JJ PREV-TAG TO");
        let words = ["to", "run"];

        let forward = RuleSet::from(vec![first.clone(), second.clone()]);
        let mut tags = vec!["TO", "NN"];
        forward.apply(&words, &mut tags);
        assert_eq!(tags, ["TO", "JJ"]);

        let backward = RuleSet::from(vec![second, first]);
        let mut tags = vec!["TO", "NN"];
        backward.apply(&words, &mut tags);
        assert_eq!(tags, ["TO", "VB"]);
    }

    #[test]
    fn rule_set_text_round_trip() {
        let text = "# learned rules\nNN VB PREV-TAG TO\n\nVBN VBD WDPREVTAG NP said\n";
        let rules: RuleSet = text.parse().unwrap();
        assert_eq!(rules.nr_rules(), 2);
        assert_eq!(rules.to_string(), "NN VB PREV-TAG TO\nVBN VBD WDPREVTAG NP said\n");
    }
}
