pub mod onboarding_probe;
pub mod seed_state;
