//! Standard elicitation questions for the four deception checklists.
//!
//! These are the stock question sets analysts work through when assessing
//! whether a source may be feeding false information. Each set seeds one
//! indicator per question in a standard checklist; analysts then raise
//! indicator strengths as they find support.

/// Motive-Opportunity-Means: does the adversary want to, and can it, deceive?
pub const MOM_QUESTIONS: &[&str] = &[
    "What goals would the adversary advance by deceiving us on this issue?",
    "Does the potential deceiver have a feedback channel to learn whether the deception is working?",
    "Does the adversary control or influence the channels we are relying on?",
    "Does the adversary have the organizational experience and resources to sustain a deception?",
    "Would the adversary expect us to act on this information in a way that benefits it?",
];

/// Past-Opposition-Practices: does deception fit the adversary's record?
pub const POP_QUESTIONS: &[&str] = &[
    "Does the adversary have a history of running deception operations?",
    "Does the current situation fit the pattern of its past deceptions?",
    "Are the circumstances unprecedented enough that an absence of past deception tells us little?",
];

/// Manipulability-of-Sources: could the reporting channel be controlled?
pub const MOSES_QUESTIONS: &[&str] = &[
    "Is the source vulnerable to control or manipulation by the potential deceiver?",
    "What is the basis for judging the source to be reliable?",
    "Does the source have direct access to the reported information, or only indirect access?",
    "How good is the source's track record of accurate reporting?",
];

/// Evaluation-of-Evidence: does the critical evidence itself hold up?
pub const EVE_QUESTIONS: &[&str] = &[
    "How accurate is the source's reporting? Has the full chain of evidence, including translation, been checked?",
    "Does the critical evidence arrive through a channel the adversary knows we monitor?",
    "Does the critical evidence check out, and is it corroborated by independent sources?",
    "Is any evidence one would expect to see notably absent?",
];
