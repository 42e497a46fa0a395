pub mod tiers;
