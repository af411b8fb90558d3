//! Rule Table
//!
//! Ordered `(triggers, reply)` groups. Precedence is list order: the first
//! group with any trigger contained in the lowercased input wins.

/// Identifies a rule group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Hello / hi / नमस्ते
    Greeting,
    /// How are you
    WellBeing,
    /// What is your name
    Identity,
    /// What can you do
    Capability,
    /// Current time of day
    Time,
    /// Today's date
    Date,
    /// Thanks
    Gratitude,
    /// Goodbye
    Farewell,
    /// Asking for help
    Help,
}

impl RuleKind {
    /// Stable name for logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::WellBeing => "well-being",
            Self::Identity => "identity",
            Self::Capability => "capability",
            Self::Time => "time",
            Self::Date => "date",
            Self::Gratitude => "gratitude",
            Self::Farewell => "farewell",
            Self::Help => "help",
        }
    }
}

/// What a rule group replies with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyTemplate {
    /// A canned reply
    Fixed(&'static str),
    /// A prefix followed by the current time of day
    CurrentTime {
        /// Text before the formatted time
        prefix: &'static str,
    },
    /// A prefix followed by today's date
    CurrentDate {
        /// Text before the formatted date
        prefix: &'static str,
    },
}

/// A set of trigger substrings mapped to one reply
#[derive(Clone, Debug)]
pub struct RuleGroup {
    /// Which group this is
    pub kind: RuleKind,
    /// Lowercase substrings; any one of them triggers the group
    pub triggers: Vec<&'static str>,
    /// Reply produced on a hit
    pub reply: ReplyTemplate,
}

impl RuleGroup {
    /// Create a group from its triggers and reply
    pub fn new(kind: RuleKind, triggers: &[&'static str], reply: ReplyTemplate) -> Self {
        Self {
            kind,
            triggers: triggers.to_vec(),
            reply,
        }
    }

    /// Whether any trigger occurs in `lowered` (already lowercased)
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t))
    }
}

/// Ordered list of rule groups
#[derive(Clone, Debug)]
pub struct RuleTable {
    groups: Vec<RuleGroup>,
}

impl RuleTable {
    /// Build a table from groups in precedence order
    pub fn new(groups: Vec<RuleGroup>) -> Self {
        Self { groups }
    }

    /// The nine standard groups, in precedence order
    pub fn standard() -> Self {
        use ReplyTemplate::{CurrentDate, CurrentTime, Fixed};

        Self::new(vec![
            RuleGroup::new(
                RuleKind::Greeting,
                &["hello", "hi", "नमस्ते", "नमस्कार"],
                Fixed("नमस्ते! मैं आपकी कैसे मदद कर सकता हूं?"),
            ),
            RuleGroup::new(
                RuleKind::WellBeing,
                &["kaise ho", "कैसे हो", "how are you"],
                Fixed("मैं बिल्कुल ठीक हूं, धन्यवाद! आप कैसे हैं?"),
            ),
            RuleGroup::new(
                RuleKind::Identity,
                &["naam", "नाम", "name"],
                Fixed("मेरा नाम AI एजेंट है। मैं आपकी सहायता के लिए बनाया गया हूं!"),
            ),
            RuleGroup::new(
                RuleKind::Capability,
                &["kya kar sakte", "क्या कर सकते", "what can you do"],
                Fixed(
                    "मैं आपके सवालों का जवाब दे सकता हूं, जानकारी दे सकता हूं, और बातचीत कर सकता हूं। आप मुझसे कुछ भी पूछ सकते हैं!",
                ),
            ),
            RuleGroup::new(
                RuleKind::Time,
                &["time", "समय", "samay"],
                CurrentTime {
                    prefix: "अभी का समय है: ",
                },
            ),
            RuleGroup::new(
                RuleKind::Date,
                &["date", "तारीख", "tareekh"],
                CurrentDate {
                    prefix: "आज की तारीख है: ",
                },
            ),
            RuleGroup::new(
                RuleKind::Gratitude,
                &["dhanyavad", "धन्यवाद", "thank"],
                Fixed("आपका स्वागत है! 😊"),
            ),
            RuleGroup::new(
                RuleKind::Farewell,
                &["bye", "alvida", "अलविदा"],
                Fixed("अलविदा! फिर मिलेंगे! 👋"),
            ),
            RuleGroup::new(
                RuleKind::Help,
                &["help", "madad", "मदद"],
                Fixed(
                    "मैं यहां आपकी मदद के लिए हूं! आप मुझसे कुछ भी पूछ सकते हैं - सवाल, जानकारी, या बस बातचीत करना।",
                ),
            ),
        ])
    }

    /// First group matching `text`, compared case-insensitively
    pub fn find(&self, text: &str) -> Option<&RuleGroup> {
        let lowered = text.to_lowercase();
        self.groups.iter().find(|g| g.matches(&lowered))
    }

    /// Append a group with the lowest precedence
    pub fn push(&mut self, group: RuleGroup) {
        self.groups.push(group);
    }

    /// All groups in precedence order
    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
