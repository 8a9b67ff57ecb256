//! The rule graph of a grammar descriptor.
//!
//! Every rule is a JSON object discriminated by its `type` string. The
//! remaining keys depend on that type: terminals carry a `value`, symbols and
//! fields a `name`, wrappers a `content`, and sequences or choices `members`.

use serde::Deserialize;

/// One node of the rule graph.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Which combinator this node is.
    #[serde(rename = "type")]
    pub rule_type: RuleType,

    /// Literal text, pattern source, alias target, or precedence level.
    pub value: Option<RuleValue>,

    /// Referenced rule (`SYMBOL`), field name (`FIELD`), or reserved-word context (`RESERVED`).
    pub name: Option<String>,

    /// Wrapped rule of `REPEAT`, `PREC*`, `FIELD`, `ALIAS`, `TOKEN` and `RESERVED` nodes.
    pub content: Option<Box<Rule>>,

    /// Alternatives of a `CHOICE` or elements of a `SEQ`.
    #[serde(default)]
    pub members: Vec<Rule>,

    /// Whether an `ALIAS` produces a named node.
    pub named: Option<bool>,

    /// Regex flags of a `PATTERN`.
    pub flags: Option<String>,

    /// Reserved-word set selected by a `RESERVED` node.
    pub context_name: Option<String>,
}

/// The scalar carried in a rule's `value` key.
///
/// Precedence wrappers use a number, or a string naming an entry of the
/// grammar's `precedences` table. Terminals and aliases use text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// A numeric precedence level.
    Integer(i32),

    /// Text: a literal, a pattern, an alias target or a named precedence.
    String(String),
}

/// The `type` discriminant of a [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    /// The empty production.
    Blank,
    /// A literal token.
    String,
    /// A regular-expression token.
    Pattern,
    /// A reference to another rule.
    Symbol,
    /// One of several alternatives.
    Choice,
    /// Members in order.
    Seq,
    /// Zero or more repetitions.
    Repeat,
    /// One or more repetitions.
    Repeat1,
    /// Precedence without associativity.
    Prec,
    /// Left-associative precedence.
    PrecLeft,
    /// Right-associative precedence.
    PrecRight,
    /// Precedence resolved at parse time.
    PrecDynamic,
    /// Names a child of the produced node.
    Field,
    /// Renames the produced node.
    Alias,
    /// Lexes the content as one token.
    Token,
    /// A token that admits no leading extras.
    ImmediateToken,
    /// Switches the reserved-word set.
    Reserved,
}

impl RuleType {
    /// The `type` string used in the descriptor.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "BLANK",
            Self::String => "STRING",
            Self::Pattern => "PATTERN",
            Self::Symbol => "SYMBOL",
            Self::Choice => "CHOICE",
            Self::Seq => "SEQ",
            Self::Repeat => "REPEAT",
            Self::Repeat1 => "REPEAT1",
            Self::Prec => "PREC",
            Self::PrecLeft => "PREC_LEFT",
            Self::PrecRight => "PREC_RIGHT",
            Self::PrecDynamic => "PREC_DYNAMIC",
            Self::Field => "FIELD",
            Self::Alias => "ALIAS",
            Self::Token => "TOKEN",
            Self::ImmediateToken => "IMMEDIATE_TOKEN",
            Self::Reserved => "RESERVED",
        }
    }

    /// Returns `true` for the `PREC*` wrappers.
    #[must_use]
    pub fn is_precedence(self) -> bool {
        matches!(
            self,
            Self::Prec | Self::PrecLeft | Self::PrecRight | Self::PrecDynamic
        )
    }
}

impl Rule {
    /// Returns the descriptor's `type` string for this rule.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.rule_type.as_str()
    }

    /// Returns `true` if this rule is a lexical leaf.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.rule_type, RuleType::String | RuleType::Pattern)
    }

    /// Returns `true` if this rule is a symbol reference.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self.rule_type, RuleType::Symbol)
    }

    /// Returns the referenced symbol name, if applicable.
    #[must_use]
    pub fn symbol_name(&self) -> Option<&str> {
        if self.is_symbol() {
            self.name.as_deref()
        } else {
            None
        }
    }

    /// Returns the direct sub-rules of this rule.
    ///
    /// Compound rules yield their `members`, wrappers yield their `content`.
    pub fn children(&self) -> impl Iterator<Item = &Rule> {
        self.members.iter().chain(self.content.as_deref())
    }

    /// Calls `visit` with every symbol name referenced anywhere below this rule.
    pub fn for_each_symbol<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        if let Some(name) = self.symbol_name() {
            visit(name);
        }
        for child in self.children() {
            child.for_each_symbol(visit);
        }
    }

    /// Calls `visit` with this rule and every rule below it, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Rule)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Returns the numeric level of a precedence wrapper.
    ///
    /// Named precedences (string values) have no numeric level.
    #[must_use]
    pub fn precedence(&self) -> Option<i32> {
        match (self.rule_type.is_precedence(), &self.value) {
            (true, Some(RuleValue::Integer(level))) => Some(*level),
            _ => None,
        }
    }

    /// Returns the literal of a `STRING` rule.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        self.text_for(RuleType::String)
    }

    /// Returns the source of a `PATTERN` rule.
    #[must_use]
    pub fn pattern_value(&self) -> Option<&str> {
        self.text_for(RuleType::Pattern)
    }

    /// Returns the node name an `ALIAS` rule renames its content to.
    #[must_use]
    pub fn alias_value(&self) -> Option<&str> {
        self.text_for(RuleType::Alias)
    }

    fn text_for(&self, rule_type: RuleType) -> Option<&str> {
        match &self.value {
            Some(RuleValue::String(text)) if self.rule_type == rule_type => Some(text.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(json: &str) -> Rule {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_terminals() {
        let literal = rule(r#"{"type": "STRING", "value": "import"}"#);
        assert_eq!(literal.string_value(), Some("import"));
        assert_eq!(literal.pattern_value(), None);
        assert!(literal.is_terminal());

        let pattern = rule(r#"{"type": "PATTERN", "value": "[a-z]+", "flags": "i"}"#);
        assert_eq!(pattern.pattern_value(), Some("[a-z]+"));
        assert_eq!(pattern.flags.as_deref(), Some("i"));
        assert_eq!(pattern.type_name(), "PATTERN");
    }

    #[test]
    fn test_precedence_values() {
        let numeric = rule(
            r#"{
                "type": "PREC_LEFT",
                "value": -2,
                "content": {
                    "type": "SEQ",
                    "members": [
                        {"type": "SYMBOL", "name": "expr"},
                        {"type": "STRING", "value": "+"},
                        {"type": "SYMBOL", "name": "term"}
                    ]
                }
            }"#,
        );
        assert_eq!(numeric.rule_type, RuleType::PrecLeft);
        assert_eq!(numeric.precedence(), Some(-2));

        let mut symbols = Vec::new();
        numeric.for_each_symbol(&mut |name| symbols.push(name));
        assert_eq!(symbols, vec!["expr", "term"]);

        let named = rule(r#"{"type": "PREC", "value": "call", "content": {"type": "BLANK"}}"#);
        assert_eq!(named.value, Some(RuleValue::String("call".to_string())));
        assert_eq!(named.precedence(), None);
    }

    #[test]
    fn test_alias_value() {
        let alias = rule(
            r#"{
                "type": "ALIAS",
                "content": {"type": "SYMBOL", "name": "interpolated_string_content"},
                "named": true,
                "value": "string_content"
            }"#,
        );
        assert_eq!(alias.alias_value(), Some("string_content"));
        assert_eq!(alias.named, Some(true));
        assert_eq!(alias.string_value(), None);
        assert_eq!(alias.children().count(), 1);
    }

    #[test]
    fn test_every_type_name() {
        let names = [
            "BLANK",
            "STRING",
            "PATTERN",
            "SYMBOL",
            "CHOICE",
            "SEQ",
            "REPEAT",
            "REPEAT1",
            "PREC",
            "PREC_LEFT",
            "PREC_RIGHT",
            "PREC_DYNAMIC",
            "FIELD",
            "ALIAS",
            "TOKEN",
            "IMMEDIATE_TOKEN",
            "RESERVED",
        ];
        for name in names {
            let parsed: RuleType = serde_json::from_str(&format!("\"{name}\"")).unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn test_walk_order() {
        let choice = rule(
            r#"{"type": "CHOICE", "members": [
                {"type": "TOKEN", "content": {"type": "PATTERN", "value": "[0-9]+"}},
                {"type": "BLANK"}
            ]}"#,
        );
        let mut seen = Vec::new();
        choice.walk(&mut |node| seen.push(node.type_name()));
        assert_eq!(seen, vec!["CHOICE", "TOKEN", "PATTERN", "BLANK"]);
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<Rule>(r#"{"type": "LOOKAHEAD"}"#).is_err());
    }
}
