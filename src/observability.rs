use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("chatline.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("chatline.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("chatline.client.request_duration_seconds");

pub(crate) static SESSIONS_CREATED: Counter = Counter::new("chatline.session.created");
pub(crate) static SESSIONS_DEGRADED: Counter = Counter::new("chatline.session.degraded");
pub(crate) static MESSAGES_SENT: Counter = Counter::new("chatline.session.messages_sent");
pub(crate) static MESSAGES_SKIPPED: Counter = Counter::new("chatline.session.messages_skipped");
pub(crate) static REPLY_FALLBACKS: Counter = Counter::new("chatline.session.reply_fallbacks");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSIONS_CREATED);
    collector.register_counter(&SESSIONS_DEGRADED);
    collector.register_counter(&MESSAGES_SENT);
    collector.register_counter(&MESSAGES_SKIPPED);
    collector.register_counter(&REPLY_FALLBACKS);
}
