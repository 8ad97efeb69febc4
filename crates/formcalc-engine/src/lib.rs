//! formcalc_engine - Table model and the recompute engine.

pub mod engine;
