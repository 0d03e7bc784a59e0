use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_SESSIONS: IntGauge =
        IntGauge::new("letras_active_sessions", "Active sessions").expect("metric cannot be created");
    pub static ref CONNECTED_CLIENTS: IntGauge =
        IntGauge::new("letras_connected_clients", "Amount of clients connected")
            .expect("metric cannot be created");
    pub static ref ROUNDS_WON: IntCounter =
        IntCounter::new("letras_rounds_won", "Rounds where every word was solved")
            .expect("metric cannot be created");
    pub static ref ROUNDS_LOST: IntCounter =
        IntCounter::new("letras_rounds_lost", "Rounds where every player ran out of chances")
            .expect("metric cannot be created");
    pub static ref GUESSES: IntCounter =
        IntCounter::new("letras_guesses", "Guesses submitted, rejected ones included")
            .expect("metric cannot be created");
}

pub fn register_metrics() {
    REGISTRY
        .register(Box::new(ACTIVE_SESSIONS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(CONNECTED_CLIENTS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(ROUNDS_WON.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(ROUNDS_LOST.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(GUESSES.clone()))
        .expect("collector cannot be registered");
}
