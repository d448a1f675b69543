use rand::Rng;

use crate::models::ReplyCategory;

/// Keyword sets per category. Matching is case-insensitive substring search,
/// applied in the fixed order of `classify` below; the first category with a
/// hit wins, so "book an emergency appointment" is an appointment, not an
/// emergency. That ordering is load-bearing and pinned by a regression test.
const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey"];
const APPOINTMENT_KEYWORDS: &[&str] = &["appointment", "book", "schedule"];
const EMERGENCY_KEYWORDS: &[&str] = &["emergency", "crisis", "urgent", "help me"];
const SERVICES_KEYWORDS: &[&str] = &["service", "therapy", "counseling"];

const GREETING_REPLIES: &[&str] = &[
    "Hello! I'm here to help you with your mental health journey. How can I assist you today?",
    "Hi there! I'm your WEvolve assistant. What would you like to know about our services?",
    "Welcome to WEvolve! I'm here to support you. How can I help?",
];

const APPOINTMENT_REPLIES: &[&str] = &[
    "I can help you book an appointment! You can browse our available doctors and schedule a session that works for you. Would you like me to guide you through the process?",
    "To book an appointment, simply visit our 'Find Doctors' page where you can filter by specialty and availability. Need help finding the right therapist for you?",
];

const EMERGENCY_REPLIES: &[&str] = &[
    "If you're experiencing a mental health emergency, please call our 24/7 helpline at +1 (555) 000-0000 or contact emergency services at 911. Your safety is our priority.",
    "This sounds urgent. Please reach out to our crisis helpline immediately at +1 (555) 000-0000. We have trained professionals available 24/7.",
];

const SERVICES_REPLIES: &[&str] = &[
    "We offer therapy sessions with licensed therapists, consultations with psychologists, and psychiatric services. We also provide wellness tracking and mental health resources.",
    "Our services include individual therapy, group sessions, psychiatric consultations, and wellness monitoring. All sessions can be conducted online or in-person.",
];

const DEFAULT_REPLIES: &[&str] = &[
    "I understand you're looking for help. Could you tell me more about what you need assistance with?",
    "I'm here to help! Could you be more specific about what you'd like to know?",
    "Let me help you with that. Can you provide more details about your question?",
];

pub fn classify(user_text: &str) -> ReplyCategory {
    let text = user_text.to_lowercase();

    let matches = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if matches(GREETING_KEYWORDS) {
        ReplyCategory::Greeting
    } else if matches(APPOINTMENT_KEYWORDS) {
        ReplyCategory::Appointment
    } else if matches(EMERGENCY_KEYWORDS) {
        ReplyCategory::Emergency
    } else if matches(SERVICES_KEYWORDS) {
        ReplyCategory::Services
    } else {
        ReplyCategory::Default
    }
}

/// Uniform pick from a reply pool. Injectable so tests pin the reply.
pub trait ReplyPicker: Send + Sync {
    fn pick(&self, pool_len: usize) -> usize;
}

pub struct RandomPicker;

impl ReplyPicker for RandomPicker {
    fn pick(&self, pool_len: usize) -> usize {
        rand::thread_rng().gen_range(0..pool_len)
    }
}

pub struct FirstPicker;

impl ReplyPicker for FirstPicker {
    fn pick(&self, _pool_len: usize) -> usize {
        0
    }
}

pub fn reply_pool(category: ReplyCategory) -> &'static [&'static str] {
    match category {
        ReplyCategory::Greeting => GREETING_REPLIES,
        ReplyCategory::Appointment => APPOINTMENT_REPLIES,
        ReplyCategory::Emergency => EMERGENCY_REPLIES,
        ReplyCategory::Services => SERVICES_REPLIES,
        ReplyCategory::Default => DEFAULT_REPLIES,
    }
}

pub fn respond(category: ReplyCategory, picker: &dyn ReplyPicker) -> String {
    let pool = reply_pool(category);
    pool[picker.pick(pool.len()).min(pool.len() - 1)].to_string()
}
