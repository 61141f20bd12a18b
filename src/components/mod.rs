mod claim_card;

pub use claim_card::ClaimCard;
