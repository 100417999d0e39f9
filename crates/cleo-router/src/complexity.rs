// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic task complexity scoring.
//!
//! Maps a user message to a 0-100 score and a coarse recommendation
//! (answer directly, delegate, or clarify) from weighted keyword patterns.
//! No LLM pre-call, no network, no latency.
//!
//! Scoring starts from a baseline of 40. Every "simple" factor subtracts a
//! fixed amount and every "complex" factor adds one; a message that talks
//! about both a calendar and an email gets a flat +25. The result is clamped
//! to `[0, 100]`, then `< 30` means direct and `> 70` means delegate.
//!
//! The point values and cutoffs are tuning constants with no calibration
//! data behind them. Changing any of them changes routing for real traffic.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Score every message starts from before factors are applied.
pub const BASELINE_SCORE: i32 = 40;

/// Scores strictly below this are answered directly.
pub const DIRECT_THRESHOLD: u8 = 30;

/// Scores strictly above this are delegated.
pub const DELEGATE_THRESHOLD: u8 = 70;

/// Score reported for an explicit `@agent` mention.
pub const EXPLICIT_MENTION_SCORE: u8 = 99;

/// Coarse routing recommendation derived from the score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// Simple enough for the general assistant.
    Direct,
    /// Complex enough to hand to a specialist.
    Delegate,
    /// Ambiguous; a specialist match or a follow-up question decides.
    Clarify,
}

impl Recommendation {
    /// Apply the fixed cutoffs to a clamped score.
    pub fn from_score(score: u8) -> Self {
        if score < DIRECT_THRESHOLD {
            Recommendation::Direct
        } else if score > DELEGATE_THRESHOLD {
            Recommendation::Delegate
        } else {
            Recommendation::Clarify
        }
    }

    fn explanation(self) -> &'static str {
        match self {
            Recommendation::Direct => "simple enough to answer directly",
            Recommendation::Delegate => "complex enough to benefit from a specialist",
            Recommendation::Clarify => "ambiguous, a specialist match or follow-up question decides",
        }
    }
}

/// Result of scoring one message. Created fresh per call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityScore {
    /// Clamped score in `0..=100`.
    pub score: u8,
    /// Labels of the matched factors, in evaluation order.
    pub factors: Vec<String>,
    pub recommendation: Recommendation,
    /// Human-readable explanation.
    pub reasoning: String,
}

impl ComplexityScore {
    /// The synthetic score attached to an explicit-mention early exit.
    pub fn explicit_mention(agent_id: &str) -> Self {
        Self {
            score: EXPLICIT_MENTION_SCORE,
            factors: vec!["explicit_mention".to_string()],
            recommendation: Recommendation::Delegate,
            reasoning: format!("User explicitly addressed {agent_id}; skipped complexity analysis"),
        }
    }
}

/// One scoring signal and its fixed weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Factor {
    Greeting,
    Acknowledgement,
    SimpleQuestion,
    SingleConcept,
    YesNo,
    MultiStep,
    MultipleQuestions,
    Technical,
    Financial,
    Ecommerce,
    Creative,
    Research,
    SocialMedia,
    FileManipulation,
    VagueScope,
    LongRequest,
    CalendarEmail,
}

impl Factor {
    /// Signed contribution to the score.
    pub const fn points(self) -> i32 {
        match self {
            Factor::Greeting => -20,
            Factor::Acknowledgement => -15,
            Factor::SimpleQuestion => -15,
            Factor::SingleConcept => -10,
            Factor::YesNo => -10,
            Factor::MultiStep => 20,
            Factor::MultipleQuestions => 15,
            Factor::Technical => 25,
            Factor::Financial => 20,
            Factor::Ecommerce => 20,
            Factor::Creative => 15,
            Factor::Research => 20,
            Factor::SocialMedia => 20,
            Factor::FileManipulation => 15,
            Factor::VagueScope => 15,
            Factor::LongRequest => 15,
            Factor::CalendarEmail => 25,
        }
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("complexity pattern must compile")
}

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    re(r"^(hi|hello|hey|hola|howdy|greetings|good (morning|afternoon|evening)|buenos d[ií]as|buenas (tardes|noches)|what'?s up|how are you)\b")
});
static ACKNOWLEDGEMENT: LazyLock<Regex> = LazyLock::new(|| {
    re(r"^(thanks|thank you|thx|ok|okay|gracias|perfect|perfecto|got it|great|cool|nice)\b")
});
static SIMPLE_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    re(r"^(what is|what's|who is|who's|when is|where is|how much is|qu[eé] es|qui[eé]n es|cu[aá]ndo es|d[oó]nde est[aá])\b")
});
static YES_NO: LazyLock<Regex> =
    LazyLock::new(|| re(r"^(yes|no|sure|yep|nope|yeah|nah|s[ií])[.!]?$"));
static MULTI_STEP: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(then|after that|afterwards|first|next|finally|step by step|and also|luego|despu[eé]s|primero|finalmente)\b")
});
static TECHNICAL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(code|coding|programming|program|function|bug|debug|api|database|sql|deploy|deployment|server|python|javascript|typescript|rust|react|script|algorithm|refactor|compile|github|docker|kubernetes|backend|frontend)\b")
});
static FINANCIAL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(budget|investment|investing|invest|stocks?|portfolio|crypto|cryptocurrency|bitcoin|tax|taxes|accounting|invoices?|revenue|profit|loan|interest rate|expenses?|finanzas|presupuesto)\b")
});
static ECOMMERCE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(shopify|e-?commerce|online store|store|products?|inventory|orders?|sales|checkout|dropshipping|tienda|ventas)\b")
});
static CREATIVE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(logo|poem|story|slogan|creative|brainstorm|illustration|branding|song lyrics|write a (blog|story|song|poem))\b")
});
static RESEARCH: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(research|investigate|analyze|analyse|analysis|compare|comparison|in-depth|in depth|comprehensive|report on|latest news|investigar|investigación)\b")
});
static SOCIAL_MEDIA: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(twitter|tweet|instagram|facebook|tiktok|linkedin|telegram|social media|redes sociales|hashtags?|followers)\b")
});
static FILE_MANIPULATION: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(spreadsheet|pdf|csv|excel|upload|export|import|attachment|document|docx|file)\b")
});
static VAGUE_SCOPE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(something|anything|not sure|some ideas|help me with|whatever|stuff|algo)\b")
});
static CALENDAR: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(calendar|meeting|meetings|schedule|appointment|event|reuni[oó]n|agenda|calendario)\b")
});
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\b(email|emails|e-mail|gmail|inbox|send|mail|correo|enviar)\b")
});

/// Boolean signals detected in one message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplexityFactors {
    pub greeting: bool,
    pub acknowledgement: bool,
    pub simple_question: bool,
    pub single_concept: bool,
    pub yes_no: bool,
    pub multi_step: bool,
    pub multiple_questions: bool,
    pub technical: bool,
    pub financial: bool,
    pub ecommerce: bool,
    pub creative: bool,
    pub research: bool,
    pub social_media: bool,
    pub file_manipulation: bool,
    pub vague_scope: bool,
    pub long_request: bool,
    pub calendar_and_email: bool,
}

impl ComplexityFactors {
    /// Evaluate every signal against an already lowercased, trimmed message.
    pub fn detect(lower: &str) -> Self {
        let word_count = lower.split_whitespace().count();

        Self {
            greeting: GREETING.is_match(lower),
            acknowledgement: ACKNOWLEDGEMENT.is_match(lower),
            simple_question: word_count <= 8 && SIMPLE_QUESTION.is_match(lower),
            single_concept: (1..=5).contains(&word_count),
            yes_no: YES_NO.is_match(lower),
            multi_step: MULTI_STEP.is_match(lower),
            multiple_questions: lower.matches('?').count() >= 2,
            technical: TECHNICAL.is_match(lower),
            financial: FINANCIAL.is_match(lower),
            ecommerce: ECOMMERCE.is_match(lower),
            creative: CREATIVE.is_match(lower),
            research: RESEARCH.is_match(lower),
            social_media: SOCIAL_MEDIA.is_match(lower),
            file_manipulation: FILE_MANIPULATION.is_match(lower),
            vague_scope: VAGUE_SCOPE.is_match(lower),
            long_request: word_count > 50,
            calendar_and_email: CALENDAR.is_match(lower) && EMAIL.is_match(lower),
        }
    }

    /// Matched factors in evaluation order.
    pub fn matched(&self) -> Vec<Factor> {
        [
            (self.greeting, Factor::Greeting),
            (self.acknowledgement, Factor::Acknowledgement),
            (self.simple_question, Factor::SimpleQuestion),
            (self.single_concept, Factor::SingleConcept),
            (self.yes_no, Factor::YesNo),
            (self.multi_step, Factor::MultiStep),
            (self.multiple_questions, Factor::MultipleQuestions),
            (self.technical, Factor::Technical),
            (self.financial, Factor::Financial),
            (self.ecommerce, Factor::Ecommerce),
            (self.creative, Factor::Creative),
            (self.research, Factor::Research),
            (self.social_media, Factor::SocialMedia),
            (self.file_manipulation, Factor::FileManipulation),
            (self.vague_scope, Factor::VagueScope),
            (self.long_request, Factor::LongRequest),
            (self.calendar_and_email, Factor::CalendarEmail),
        ]
        .into_iter()
        .filter_map(|(hit, factor)| hit.then_some(factor))
        .collect()
    }
}

/// Score a message's complexity.
///
/// Pure and deterministic. An empty message matches nothing and lands on
/// the baseline, which is `Clarify`.
pub fn analyze_task_complexity(message: &str) -> ComplexityScore {
    let lower = message.trim().to_lowercase();
    let matched = ComplexityFactors::detect(&lower).matched();

    let raw = matched
        .iter()
        .fold(BASELINE_SCORE, |acc, factor| acc + factor.points());
    let score = raw.clamp(0, 100) as u8;
    let recommendation = Recommendation::from_score(score);

    let factors: Vec<String> = matched
        .iter()
        .map(|f| <&'static str>::from(*f).to_string())
        .collect();

    let reasoning = if factors.is_empty() {
        format!(
            "No strong complexity signals (score {score}/100): {}",
            recommendation.explanation()
        )
    } else {
        format!(
            "Score {score}/100 from {}: {}",
            factors.join(", "),
            recommendation.explanation()
        )
    };

    ComplexityScore {
        score,
        factors,
        recommendation,
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn greetings_are_direct() {
        for msg in ["hello", "hi there", "Hey, how are you?", "good morning", "Hola"] {
            let result = analyze_task_complexity(msg);
            assert!(result.score < 30, "{msg:?} scored {}", result.score);
            assert_eq!(result.recommendation, Recommendation::Direct, "{msg:?}");
            assert_eq!(result.factors[0], "greeting");
        }
    }

    #[test]
    fn greeting_does_not_match_word_prefixes() {
        let factors = ComplexityFactors::detect("history of the roman empire");
        assert!(!factors.greeting);
    }

    #[test]
    fn empty_message_is_baseline_clarify() {
        for msg in ["", "   "] {
            let result = analyze_task_complexity(msg);
            assert_eq!(result.score, 40);
            assert!(result.factors.is_empty());
            assert_eq!(result.recommendation, Recommendation::Clarify);
        }
    }

    #[test]
    fn acknowledgements_and_yes_no_are_direct() {
        assert_eq!(
            analyze_task_complexity("thanks!").recommendation,
            Recommendation::Direct
        );
        let yes = analyze_task_complexity("yes");
        assert_eq!(yes.factors, vec!["single_concept", "yes_no"]);
        assert_eq!(yes.score, 20);
    }

    #[test]
    fn short_factual_question_is_direct() {
        let result = analyze_task_complexity("What is the capital of Peru?");
        assert_eq!(result.factors, vec!["simple_question"]);
        assert_eq!(result.score, 25);
        assert_eq!(result.recommendation, Recommendation::Direct);
    }

    #[test]
    fn long_what_is_question_is_not_simple() {
        let factors = ComplexityFactors::detect(
            "what is the best way to structure a monorepo with many services in it",
        );
        assert!(!factors.simple_question);
    }

    #[test]
    fn technical_multi_step_request_delegates() {
        let result = analyze_task_complexity(
            "Write a Python script that reads the API logs, then deploy it to the server",
        );
        assert!(result.factors.contains(&"technical".to_string()));
        assert!(result.factors.contains(&"multi_step".to_string()));
        assert_eq!(result.score, 85);
        assert_eq!(result.recommendation, Recommendation::Delegate);
    }

    #[test]
    fn calendar_and_email_bonus_is_applied() {
        let both = analyze_task_complexity(
            "schedule a meeting with the design team for tomorrow morning and email the invite",
        );
        let calendar_only = analyze_task_complexity(
            "schedule a meeting with the design team for tomorrow morning and share the invite",
        );
        let email_only = analyze_task_complexity(
            "prepare notes with the design team for tomorrow morning and email the invite",
        );

        assert!(both.score >= calendar_only.score + 25);
        assert!(both.score >= email_only.score + 25);
        assert_ne!(both.recommendation, Recommendation::Direct);
        assert_eq!(both.factors.last().map(String::as_str), Some("calendar_email"));
    }

    #[test]
    fn score_is_clamped_at_100() {
        let result = analyze_task_complexity(
            "First research crypto investment taxes, then build a python api for my shopify store \
             and post a tweet with a creative slogan and export a pdf report?? not sure about anything",
        );
        assert_eq!(result.score, 100);
        assert_eq!(result.recommendation, Recommendation::Delegate);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(Recommendation::from_score(29), Recommendation::Direct);
        assert_eq!(Recommendation::from_score(30), Recommendation::Clarify);
        assert_eq!(Recommendation::from_score(70), Recommendation::Clarify);
        assert_eq!(Recommendation::from_score(71), Recommendation::Delegate);
    }

    #[test]
    fn factor_labels_are_snake_case() {
        assert_eq!(Factor::FileManipulation.to_string(), "file_manipulation");
        assert_eq!(<&'static str>::from(Factor::CalendarEmail), "calendar_email");
    }

    #[test]
    fn reasoning_names_factors() {
        let result = analyze_task_complexity("analyze our quarterly revenue");
        assert!(result.reasoning.contains("financial"));
        assert!(result.reasoning.contains("research"));
    }

    #[test]
    fn explicit_mention_score_is_99() {
        let score = ComplexityScore::explicit_mention("toby-technical");
        assert_eq!(score.score, 99);
        assert_eq!(score.recommendation, Recommendation::Delegate);
    }

    #[test]
    fn recommendation_serializes_lowercase() {
        let json = serde_json::to_string(&Recommendation::Clarify).unwrap();
        assert_eq!(json, "\"clarify\"");
    }

    proptest! {
        #[test]
        fn score_always_in_range_and_consistent(msg in ".{0,300}") {
            let result = analyze_task_complexity(&msg);
            prop_assert!(result.score <= 100);
            prop_assert_eq!(result.recommendation, Recommendation::from_score(result.score));
        }

        #[test]
        fn scoring_is_deterministic(msg in "[a-z ?]{0,120}") {
            prop_assert_eq!(analyze_task_complexity(&msg), analyze_task_complexity(&msg));
        }
    }
}
