use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("A game needs at least one configured player.")]
    NoPlayersConfigured,
    #[error("A player nickname is configured more than once. Nickname: '{0}'.")]
    DuplicatedPlayer(String),
    #[error("Invalid delay range. MinDelayMs: '{0}', MaxDelayMs: '{1}'.")]
    InvalidDelayRange(u64, u64),
    #[error("The player is not part of this game. Nickname: '{0}'.")]
    PlayerDoesNotExist(String),
    #[error("The player is already connected. Nickname: '{0}'.")]
    PlayerAlreadyConnected(String),
}
