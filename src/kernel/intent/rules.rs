//! Ordered intent rule table.
//!
//! Each rule pairs a `matches` predicate with an `extract` function. The
//! classifier walks `RULES` front to back and the first rule whose predicate
//! holds decides the intent, so table order *is* the tie-break.
//!
//! All matching is done on word boundaries over a normalized utterance.

use super::types::{Entities, Intent, Selection, View};

/// A transcript after normalization, split into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    text: String,
    tokens: Vec<String>,
}

impl Utterance {
    pub fn new(raw: &str) -> Self {
        let text = normalize(raw);
        let tokens = text.split(' ').filter(|t| !t.is_empty()).map(str::to_string).collect();
        Self { text, tokens }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token index where `phrase` starts, matching whole words only.
    pub fn find(&self, phrase: &str) -> Option<usize> {
        self.find_from(0, phrase)
    }

    pub fn find_from(&self, start: usize, phrase: &str) -> Option<usize> {
        let words: Vec<&str> = phrase.split(' ').collect();
        if words.is_empty() || words.len() > self.tokens.len() {
            return None;
        }
        (start..=self.tokens.len() - words.len())
            .find(|&i| words.iter().enumerate().all(|(k, w)| self.tokens[i + k] == *w))
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.find(phrase).is_some()
    }

    pub fn contains_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.contains(p))
    }
}

/// Lowercase, trim, turn punctuation into whitespace and collapse runs of it.
/// Apostrophes, colons and hyphens survive ("don't", "8:30", "-2").
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '\'' | ':' | '-') { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub struct IntentRule {
    pub intent: Intent,
    pub matches: fn(&Utterance) -> bool,
    pub extract: fn(&Utterance) -> Entities,
}

impl std::fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRule").field("intent", &self.intent).finish()
    }
}

/// Fresh-command rules in priority order.
pub const RULES: [IntentRule; 9] = [
    IntentRule { intent: Intent::CompoundSymptomAndResource, matches: matches_compound, extract: extract_compound },
    IntentRule { intent: Intent::CheckSymptoms, matches: matches_symptom, extract: extract_symptom },
    IntentRule { intent: Intent::FindResource, matches: matches_resource, extract: extract_resource },
    IntentRule { intent: Intent::Navigate, matches: matches_navigate, extract: extract_navigate },
    IntentRule { intent: Intent::AddToCart, matches: matches_cart, extract: extract_cart },
    IntentRule { intent: Intent::SetReminder, matches: matches_reminder, extract: extract_reminder },
    IntentRule { intent: Intent::IdentifyMedicine, matches: matches_identify, extract: extract_identify },
    IntentRule { intent: Intent::DescribeSurroundings, matches: matches_describe, extract: no_entities },
    IntentRule { intent: Intent::Confirm, matches: matches_confirm, extract: extract_confirm },
];

// --- Lexicons ---

type Lexicon = &'static [(&'static str, &'static [&'static str])];

const SYMPTOMS: Lexicon = &[
    ("headache", &["headache", "headaches", "head ache", "head hurts", "head is hurting"]),
    ("migraine", &["migraine"]),
    ("fever", &["fever", "feverish", "high temperature", "temperature"]),
    ("cough", &["cough", "coughing"]),
    ("cold", &["cold", "common cold"]),
    ("sore throat", &["sore throat", "throat pain"]),
    ("stomach ache", &["stomach ache", "stomachache", "stomach pain", "abdominal pain", "tummy ache"]),
    ("chest pain", &["chest pain"]),
    ("back pain", &["back pain", "backache"]),
    ("toothache", &["toothache", "tooth ache", "tooth pain"]),
    ("nausea", &["nausea", "nauseous", "nauseated"]),
    ("vomiting", &["vomiting", "throwing up"]),
    ("diarrhea", &["diarrhea", "diarrhoea", "loose motions"]),
    ("dizziness", &["dizziness", "dizzy"]),
    ("fatigue", &["fatigue", "tired", "exhausted"]),
    ("rash", &["rash", "rashes", "skin rash"]),
    ("body ache", &["body ache", "body pain"]),
    ("breathlessness", &["shortness of breath", "breathless", "difficulty breathing", "trouble breathing"]),
    ("runny nose", &["runny nose"]),
    ("insomnia", &["insomnia"]),
];

const SYMPTOM_CUES: &[&str] = &[
    "i have", "i've", "i got", "i've got", "got a", "having", "i feel", "feeling", "i am", "i'm",
    "suffering", "hurts", "hurting", "symptom", "symptoms", "check",
];

/// Phrases that ask for a symptom check without naming a symptom.
const SYMPTOM_PHRASES: &[&str] = &[
    "check my symptoms", "check symptoms", "i feel sick", "i'm sick", "i am sick",
    "not feeling well", "i feel unwell", "feeling unwell", "i'm unwell",
];

const RESOURCES: Lexicon = &[
    ("pharmacy", &["pharmacy", "pharmacies", "chemist", "medical store", "drugstore", "drug store"]),
    ("hospital", &["hospital", "hospitals"]),
    ("clinic", &["clinic", "clinics"]),
    ("doctor", &["doctor", "doctors", "physician"]),
    ("lab", &["lab", "laboratory", "diagnostic centre", "diagnostic center"]),
    ("blood bank", &["blood bank"]),
    ("dentist", &["dentist"]),
];

const RESOURCE_CUES: &[&str] = &[
    "find", "nearest", "nearby", "near me", "near by", "where is", "where's", "where can i",
    "locate", "search", "looking for", "look for", "need a", "need to see", "show me", "closest",
];

const NAV_CUES: &[&str] = &[
    "go to", "go back to", "take me to", "take me", "navigate to", "switch to", "open", "show",
    "bring up", "launch",
];

/// Navigation cues explicit enough to mean NAVIGATE even without a known view.
const EXPLICIT_NAV_CUES: &[&str] = &["go to", "take me to", "navigate to", "switch to", "open"];

const CART_WORDS: &[&str] = &["cart", "basket"];

const MEASURES: &[&str] = &[
    "strip", "strips", "pack", "packs", "packet", "packets", "box", "boxes", "bottle", "bottles",
    "tablet", "tablets", "sheet", "sheets",
];

const ARTICLES: &[&str] = &["a", "an", "some", "the", "my", "of", "more", "please"];

const DOSE_UNITS: &[&str] = &[
    "mg", "ml", "mcg", "g", "tablet", "tablets", "pill", "pills", "capsule", "capsules", "drop",
    "drops", "unit", "units", "puff", "puffs", "spoon", "spoons", "teaspoon", "teaspoons",
];

const TIME_WORDS: &[&str] = &["am", "pm", "o'clock", "noon", "midnight", "half", "quarter", "past", "a", "p", "m"];

const DAYPARTS: &[&str] = &["morning", "afternoon", "evening", "night", "bedtime", "tonight"];

const REMINDER_STOPS: &[&str] = &["at", "every", "daily", "in", "tonight", "tomorrow", "before", "after", "with"];

const IDENTIFY_PHRASES: &[&str] = &[
    "identify", "what is this medicine", "what medicine is this", "what is this pill",
    "what pill is this", "what is this tablet", "what's this medicine", "what's this pill",
    "scan this medicine", "scan my medicine", "scan medicine",
];

const IDENTIFY_FILLER: &[&str] = &[
    "this", "that", "the", "my", "a", "an", "it", "medicine", "pill", "tablet", "please", "for", "me",
];

const DESCRIBE_PHRASES: &[&str] = &[
    "describe", "surroundings", "surrounding", "around me", "what do you see", "what can you see",
    "where am i", "in front of me", "look around",
];

const AFFIRM_WORDS: &[&str] = &[
    "yes", "yeah", "yea", "yep", "yup", "sure", "ok", "okay", "confirm", "confirmed", "correct",
    "right", "alright", "absolutely", "definitely", "go", "ahead", "do", "sounds", "good", "course",
    "fine", "great",
];

const DECLINE_WORDS: &[&str] = &["no", "nope", "nah", "not", "don't", "dont", "never", "negative", "skip"];

const CONFIRM_FILLER: &[&str] = &[
    "please", "thanks", "thank", "you", "the", "that", "that's", "is", "option", "number", "choice",
    "i", "i'll", "want", "would", "like", "of", "it", "just", "pick", "choose", "select", "take",
    "with", "let's", "now",
];

const ORDINALS: &[(&str, usize)] = &[
    ("first", 1), ("1st", 1), ("second", 2), ("2nd", 2), ("third", 3), ("3rd", 3),
    ("fourth", 4), ("4th", 4), ("fifth", 5), ("5th", 5),
];

const NUMBER_WORDS: &[(&str, i64)] = &[
    ("zero", 0), ("one", 1), ("two", 2), ("three", 3), ("four", 4), ("five", 5), ("six", 6),
    ("seven", 7), ("eight", 8), ("nine", 9), ("ten", 10), ("eleven", 11), ("twelve", 12),
    ("thirteen", 13), ("fourteen", 14), ("fifteen", 15), ("sixteen", 16), ("seventeen", 17),
    ("eighteen", 18), ("nineteen", 19), ("twenty", 20), ("thirty", 30), ("forty", 40),
    ("fifty", 50), ("sixty", 60), ("seventy", 70), ("eighty", 80), ("ninety", 90),
    ("hundred", 100), ("dozen", 12),
];

const MAX_CONFIRM_TOKENS: usize = 6;

// --- Shared helpers ---

/// Earliest lexicon hit; the longest synonym wins at equal positions.
fn find_term(utterance: &Utterance, lexicon: Lexicon) -> Option<(usize, &'static str)> {
    let mut best: Option<(usize, usize, &'static str)> = None;
    for (canonical, synonyms) in lexicon {
        for synonym in *synonyms {
            if let Some(pos) = utterance.find(synonym) {
                let len = synonym.split(' ').count();
                let better = match best {
                    None => true,
                    Some((p, l, _)) => pos < p || (pos == p && len > l),
                };
                if better {
                    best = Some((pos, len, canonical));
                }
            }
        }
    }
    best.map(|(pos, _, canonical)| (pos, canonical))
}

fn symptom_mention(utterance: &Utterance) -> Option<(usize, &'static str)> {
    if !utterance.contains_any(SYMPTOM_CUES) {
        return None;
    }
    find_term(utterance, SYMPTOMS)
}

fn resource_request(utterance: &Utterance) -> Option<(usize, &'static str)> {
    if !utterance.contains_any(RESOURCE_CUES) {
        return None;
    }
    find_term(utterance, RESOURCES)
}

/// Longest view alias in the utterance.
fn view_mention(utterance: &Utterance) -> Option<View> {
    let mut best: Option<(usize, usize, View)> = None;
    for view in View::ALL {
        for alias in view.aliases() {
            if let Some(pos) = utterance.find(alias) {
                let len = alias.split(' ').count();
                let better = match best {
                    None => true,
                    Some((p, l, _)) => len > l || (len == l && pos < p),
                };
                if better {
                    best = Some((pos, len, view));
                }
            }
        }
    }
    best.map(|(_, _, view)| view)
}

fn view_exact(utterance: &Utterance) -> Option<View> {
    View::ALL
        .iter()
        .copied()
        .find(|v| v.aliases().iter().any(|a| *a == utterance.text()))
}

fn number_value(token: &str) -> Option<i64> {
    if let Ok(n) = token.parse::<i64>() {
        return Some(n);
    }
    NUMBER_WORDS.iter().find(|(w, _)| *w == token).map(|(_, n)| *n)
}

/// Number spoken at the start of `words` and how many tokens it spans.
/// Joins "twenty five" and "two hundred"; a bare "hundred" is 100.
fn leading_number(words: &[String]) -> Option<(i64, usize)> {
    let first = number_value(words.first()?)?;
    let next = words.get(1).and_then(|w| number_value(w));
    match next {
        Some(100) if (1..=9).contains(&first) => Some((first * 100, 2)),
        Some(unit) if (20..=90).contains(&first) && first % 10 == 0 && (1..=9).contains(&unit) => {
            Some((first + unit, 2))
        }
        _ => Some((first, 1)),
    }
}

fn ordinal_value(token: &str) -> Option<usize> {
    ORDINALS.iter().find(|(w, _)| *w == token).map(|(_, n)| *n)
}

fn join(tokens: &[String]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

fn no_entities(_: &Utterance) -> Entities {
    Entities::default()
}

// --- Compound ---

fn matches_compound(u: &Utterance) -> bool {
    match (symptom_mention(u), resource_request(u)) {
        (Some((s, _)), Some((r, _))) => s < r,
        _ => false,
    }
}

fn extract_compound(u: &Utterance) -> Entities {
    Entities {
        symptom: symptom_mention(u).map(|(_, s)| s.to_string()),
        resource: resource_request(u).map(|(_, r)| r.to_string()),
        ..Entities::default()
    }
}

// --- Symptoms ---

fn matches_symptom(u: &Utterance) -> bool {
    symptom_mention(u).is_some() || u.contains_any(SYMPTOM_PHRASES)
}

fn extract_symptom(u: &Utterance) -> Entities {
    Entities {
        symptom: symptom_mention(u).map(|(_, s)| s.to_string()),
        ..Entities::default()
    }
}

// --- Resources ---

fn matches_resource(u: &Utterance) -> bool {
    resource_request(u).is_some()
}

fn extract_resource(u: &Utterance) -> Entities {
    Entities {
        resource: resource_request(u).map(|(_, r)| r.to_string()),
        ..Entities::default()
    }
}

// --- Navigation ---

fn matches_navigate(u: &Utterance) -> bool {
    if view_exact(u).is_some() {
        return true;
    }
    if !u.contains_any(NAV_CUES) {
        return false;
    }
    view_mention(u).is_some() || u.contains_any(EXPLICIT_NAV_CUES)
}

fn extract_navigate(u: &Utterance) -> Entities {
    Entities {
        view: view_exact(u).or_else(|| view_mention(u)),
        ..Entities::default()
    }
}

// --- Cart ---

fn matches_cart(u: &Utterance) -> bool {
    (u.contains("add") && u.contains_any(CART_WORDS)) || u.contains("buy") || u.contains("order")
}

/// Clamp a spoken quantity: missing, zero, negative or non-numeric all mean 1.
pub fn resolve_quantity(spoken: Option<i64>) -> u32 {
    match spoken {
        Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

fn extract_cart(u: &Utterance) -> Entities {
    let tokens = u.tokens();
    let start = ["add", "buy", "order"]
        .iter()
        .filter_map(|verb| u.find(verb))
        .min()
        .map(|i| i + 1)
        .unwrap_or(0);
    let end = (start..tokens.len())
        .find(|&i| matches!(tokens[i].as_str(), "to" | "into" | "in" | "for" | "on"))
        .or_else(|| (start..tokens.len()).find(|&i| CART_WORDS.contains(&tokens[i].as_str())))
        .unwrap_or(tokens.len());

    let mut words: &[String] = &tokens[start..end];

    let mut spoken = None;
    if let Some((n, len)) = leading_number(words) {
        spoken = Some(n);
        words = &words[len..];
    }
    while let Some(first) = words.first() {
        if ARTICLES.contains(&first.as_str()) {
            words = &words[1..];
        } else {
            break;
        }
    }
    if words.len() >= 2 && MEASURES.contains(&words[0].as_str()) && words[1] == "of" {
        words = &words[2..];
    }
    let item: Vec<String> = words.iter().filter(|w| w.as_str() != "please").cloned().collect();

    Entities {
        medicine: join(&item),
        quantity: Some(resolve_quantity(spoken)),
        ..Entities::default()
    }
}

// --- Reminders ---

fn matches_reminder(u: &Utterance) -> bool {
    u.contains("remind me")
        || (u.contains_any(&["reminder", "alarm"]) && u.contains_any(&["set", "add", "create", "new", "make"]))
}

fn is_dose_token(token: &str) -> bool {
    // "500mg", "5ml"
    let digits = token.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && DOSE_UNITS.contains(&&token[digits..])
}

fn extract_reminder(u: &Utterance) -> Entities {
    let tokens = u.tokens();
    let body_start = u
        .find("take")
        .map(|i| i + 1)
        .or_else(|| u.find("remind me to").map(|i| i + 3))
        .or_else(|| u.find("remind me about").map(|i| i + 3))
        .or_else(|| u.find("reminder for").map(|i| i + 2))
        .or_else(|| u.find("reminder to").map(|i| i + 2))
        .unwrap_or(tokens.len());

    // Time: tokens after "at", else a part of day anywhere.
    let mut time = None;
    if let Some(at) = u.find_from(body_start.min(tokens.len()), "at") {
        let spoken: Vec<String> = tokens[at + 1..]
            .iter()
            .take_while(|t| {
                t.starts_with(|c: char| c.is_ascii_digit())
                    || number_value(t).is_some()
                    || TIME_WORDS.contains(&t.as_str())
            })
            .cloned()
            .collect();
        time = join(&spoken).map(|t| t.replace(" a m", " am").replace(" p m", " pm"));
    }
    if time.is_none() {
        time = tokens.iter().find(|t| DAYPARTS.contains(&t.as_str())).cloned();
    }

    let body_end = (body_start..tokens.len())
        .find(|&i| REMINDER_STOPS.contains(&tokens[i].as_str()))
        .unwrap_or(tokens.len());
    let body: &[String] = if body_start < body_end { &tokens[body_start..body_end] } else { &[] };

    // Dosage: "500mg" or "<number> <unit>", with a trailing "of" swallowed.
    let mut dosage = None;
    let mut rest: Vec<String> = Vec::new();
    let mut i = 0;
    while i < body.len() {
        let token = &body[i];
        if dosage.is_none() && is_dose_token(token) {
            dosage = Some(token.clone());
            i += 1;
        } else if dosage.is_none()
            && number_value(token).is_some()
            && body.get(i + 1).is_some_and(|n| DOSE_UNITS.contains(&n.as_str()))
        {
            dosage = Some(format!("{} {}", token, body[i + 1]));
            i += 2;
        } else {
            rest.push(token.clone());
            i += 1;
            continue;
        }
        if body.get(i).is_some_and(|t| t == "of") {
            i += 1;
        }
    }

    let medicine: Vec<String> = rest
        .into_iter()
        .skip_while(|t| ARTICLES.contains(&t.as_str()))
        .collect();

    Entities {
        medicine: join(&medicine),
        time,
        dosage,
        ..Entities::default()
    }
}

// --- Medicine identification ---

fn matches_identify(u: &Utterance) -> bool {
    u.contains_any(IDENTIFY_PHRASES) || (u.contains_any(&["what is", "what's"]) && u.contains("used for"))
}

fn extract_identify(u: &Utterance) -> Entities {
    let tokens = u.tokens();
    let span: &[String] = if let Some(i) = u.find("identify") {
        &tokens[i + 1..]
    } else if let Some(used) = u.find("used for") {
        let from = u
            .find("what is")
            .map(|i| i + 2)
            .or_else(|| u.find("what's").map(|i| i + 1))
            .unwrap_or(used);
        if from < used { &tokens[from..used] } else { &[] }
    } else {
        &[]
    };
    let name: Vec<String> = span
        .iter()
        .filter(|t| !IDENTIFY_FILLER.contains(&t.as_str()))
        .cloned()
        .collect();
    Entities {
        medicine: join(&name),
        ..Entities::default()
    }
}

// --- Surroundings ---

fn matches_describe(u: &Utterance) -> bool {
    u.contains_any(DESCRIBE_PHRASES)
}

// --- Confirmation ---

/// Short yes/no/selection utterances. Anything outside the confirmation
/// vocabulary disqualifies the whole utterance.
pub fn confirmation(u: &Utterance) -> Option<Selection> {
    if u.is_empty() || u.tokens().len() > MAX_CONFIRM_TOKENS {
        return None;
    }
    let mut ordinal = None;
    let mut cardinal = None;
    let mut affirm = false;
    let mut decline = false;

    for token in u.tokens() {
        let t = token.as_str();
        if let Some(n) = ordinal_value(t) {
            ordinal.get_or_insert(n);
        } else if let Some(n) = number_value(t).filter(|n| (1..=9).contains(n)) {
            cardinal.get_or_insert(n as usize);
        } else if DECLINE_WORDS.contains(&t) {
            decline = true;
        } else if AFFIRM_WORDS.contains(&t) {
            affirm = true;
        } else if !CONFIRM_FILLER.contains(&t) {
            return None;
        }
    }

    if let Some(n) = ordinal.or(cardinal) {
        Some(Selection::Choice(n))
    } else if decline {
        Some(Selection::Decline)
    } else if affirm {
        Some(Selection::Affirm)
    } else {
        None
    }
}

fn matches_confirm(u: &Utterance) -> bool {
    confirmation(u).is_some()
}

fn extract_confirm(u: &Utterance) -> Entities {
    Entities {
        selection: confirmation(u).map(|s| s.as_entity()),
        ..Entities::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(intent: Intent) -> &'static IntentRule {
        RULES.iter().find(|r| r.intent == intent).unwrap()
    }

    fn hits(intent: Intent, text: &str) -> bool {
        (rule(intent).matches)(&Utterance::new(text))
    }

    fn extract(intent: Intent, text: &str) -> Entities {
        (rule(intent).extract)(&Utterance::new(text))
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("  I have a Headache, find me a PHARMACY nearby! "), "i have a headache find me a pharmacy nearby");
        assert_eq!(normalize("Don’t"), "don't");
    }

    #[test]
    fn test_find_respects_word_boundaries() {
        let u = Utterance::new("my scolding aunt");
        assert!(!u.contains("cold"));
        assert_eq!(Utterance::new("i have a cold").find("cold"), Some(3));
    }

    #[test]
    fn test_compound_requires_symptom_before_resource() {
        assert!(hits(Intent::CompoundSymptomAndResource, "i have a fever, where is the nearest hospital"));
        assert!(!hits(Intent::CompoundSymptomAndResource, "find a clinic, i have a fever"));
        assert!(!hits(Intent::CompoundSymptomAndResource, "i have a fever"));
    }

    #[test]
    fn test_symptom_needs_cue() {
        assert!(hits(Intent::CheckSymptoms, "i'm feeling dizzy"));
        assert!(!hits(Intent::CheckSymptoms, "add cough syrup to cart"));
        assert_eq!(extract(Intent::CheckSymptoms, "i'm feeling dizzy").symptom.as_deref(), Some("dizziness"));
    }

    #[test]
    fn test_symptom_phrase_without_term() {
        assert!(hits(Intent::CheckSymptoms, "please check my symptoms"));
        assert_eq!(extract(Intent::CheckSymptoms, "please check my symptoms").symptom, None);
    }

    #[test]
    fn test_resource_canonicalizes() {
        assert_eq!(extract(Intent::FindResource, "where can i find a chemist").resource.as_deref(), Some("pharmacy"));
        assert!(!hits(Intent::FindResource, "hospital"));
    }

    #[test]
    fn test_navigate_prefers_longest_alias() {
        assert_eq!(extract(Intent::Navigate, "open ai insights").view, Some(View::AiInsights));
        assert_eq!(extract(Intent::Navigate, "show my health records").view, Some(View::HealthRecords));
        assert_eq!(extract(Intent::Navigate, "favourites").view, Some(View::Favorites));
    }

    #[test]
    fn test_navigate_without_known_view() {
        assert!(hits(Intent::Navigate, "open the thing"));
        assert_eq!(extract(Intent::Navigate, "open the thing").view, None);
        assert!(!hits(Intent::Navigate, "show me what is around"));
    }

    #[test]
    fn test_cart_quantity_resolution() {
        assert_eq!(resolve_quantity(None), 1);
        assert_eq!(resolve_quantity(Some(0)), 1);
        assert_eq!(resolve_quantity(Some(-4)), 1);
        assert_eq!(resolve_quantity(Some(3)), 3);

        let e = extract(Intent::AddToCart, "add 10 strips of crocin to my cart");
        assert_eq!(e.medicine.as_deref(), Some("crocin"));
        assert_eq!(e.quantity, Some(10));

        let e = extract(Intent::AddToCart, "add some vitamin c to the basket");
        assert_eq!(e.medicine.as_deref(), Some("vitamin c"));
        assert_eq!(e.quantity, Some(1));

        let e = extract(Intent::AddToCart, "add -2 aspirin to cart");
        assert_eq!(e.medicine.as_deref(), Some("aspirin"));
        assert_eq!(e.quantity, Some(1));
    }

    #[test]
    fn test_cart_compound_number_words() {
        let e = extract(Intent::AddToCart, "add twenty five paracetamol to cart");
        assert_eq!(e.medicine.as_deref(), Some("paracetamol"));
        assert_eq!(e.quantity, Some(25));

        let e = extract(Intent::AddToCart, "add hundred crocin to cart");
        assert_eq!(e.medicine.as_deref(), Some("crocin"));
        assert_eq!(e.quantity, Some(100));

        let e = extract(Intent::AddToCart, "add one hundred crocin to cart");
        assert_eq!(e.medicine.as_deref(), Some("crocin"));
        assert_eq!(e.quantity, Some(100));

        // "five" is not a unit for "fifteen".
        let e = extract(Intent::AddToCart, "add fifteen five star bandages to cart");
        assert_eq!(e.quantity, Some(15));
        assert_eq!(e.medicine.as_deref(), Some("five star bandages"));
    }

    #[test]
    fn test_cart_buy_for_member() {
        let e = extract(Intent::AddToCart, "buy three ibuprofen for my mother");
        assert_eq!(e.medicine.as_deref(), Some("ibuprofen"));
        assert_eq!(e.quantity, Some(3));
    }

    #[test]
    fn test_reminder_extraction() {
        let e = extract(Intent::SetReminder, "remind me to take 500mg metformin at 8 pm");
        assert_eq!(e.medicine.as_deref(), Some("metformin"));
        assert_eq!(e.dosage.as_deref(), Some("500mg"));
        assert_eq!(e.time.as_deref(), Some("8 pm"));

        let e = extract(Intent::SetReminder, "set a reminder to take 2 tablets of crocin in the morning");
        assert_eq!(e.medicine.as_deref(), Some("crocin"));
        assert_eq!(e.dosage.as_deref(), Some("2 tablets"));
        assert_eq!(e.time.as_deref(), Some("morning"));
    }

    #[test]
    fn test_reminder_without_time() {
        let e = extract(Intent::SetReminder, "remind me to take my insulin");
        assert_eq!(e.medicine.as_deref(), Some("insulin"));
        assert_eq!(e.time, None);
        assert_eq!(e.dosage, None);
    }

    #[test]
    fn test_identify_names() {
        assert_eq!(extract(Intent::IdentifyMedicine, "identify this pill").medicine, None);
        assert_eq!(extract(Intent::IdentifyMedicine, "what is dolo used for").medicine.as_deref(), Some("dolo"));
        assert_eq!(extract(Intent::IdentifyMedicine, "identify amoxicillin please").medicine.as_deref(), Some("amoxicillin"));
    }

    #[test]
    fn test_describe_phrases() {
        assert!(hits(Intent::DescribeSurroundings, "what is in front of me"));
        assert!(hits(Intent::DescribeSurroundings, "describe my surroundings"));
    }

    #[test]
    fn test_confirmation_vocabulary() {
        assert_eq!(confirmation(&Utterance::new("yes please")), Some(Selection::Affirm));
        assert_eq!(confirmation(&Utterance::new("no thanks")), Some(Selection::Decline));
        assert_eq!(confirmation(&Utterance::new("the second one")), Some(Selection::Choice(2)));
        assert_eq!(confirmation(&Utterance::new("number 3")), Some(Selection::Choice(3)));
        assert_eq!(confirmation(&Utterance::new("yes go to dashboard")), None);
        assert_eq!(confirmation(&Utterance::new("please")), None);
    }
}
