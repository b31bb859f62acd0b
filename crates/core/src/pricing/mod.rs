//! Partner pricing: level resolution and margin redistribution.
//!
//! A product's public selling price and confidential supplier (buying)
//! price produce three frozen figures at checkout time: a client discount,
//! a partner commission and the platform's gain. The base figures come from
//! the partner's level; any margin above the configured base margin is split
//! between platform, partner and client.
//!
//! Everything in this module is pure. Configuration is passed in explicitly
//! ([`PricingSettings`]) and is never cached, so an administrator's edit
//! takes effect on the next call.

pub mod levels;
pub mod redistribution;

pub use levels::{LevelSchedule, PartnerLevelRule, ScheduleError};
pub use redistribution::{
    BenefitInput, PriceBenefit, PricingSettings, SurplusSplit, compute_benefit,
};
