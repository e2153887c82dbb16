pub mod config;
pub mod commission {
    pub mod estimator;
}
pub mod domain {
    pub mod badge;
    pub mod commission;
    pub mod error;
    pub mod metrics;
    pub mod report;
}
pub mod http {
    pub mod handlers {
        pub mod badges;
        pub mod ops;
        pub mod rules;
    }
}
pub mod metrics {
    pub mod aggregator;
    pub mod history;
}
pub mod scoring {
    pub mod catalog;
    pub mod engine;
    pub mod types;
}
pub mod service {
    pub mod badge_service;
    pub mod validation;
}

#[derive(Clone)]
pub struct AppState {
    pub badge_service: service::badge_service::BadgeService,
}
