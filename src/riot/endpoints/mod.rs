mod account;
mod league;
pub mod match_v5;
mod summoner;
