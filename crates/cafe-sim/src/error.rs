use cafe_core::{AgentId, Cell};
use cafe_customer::CustomerError;
use cafe_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("no customer with id {0}")]
    UnknownCustomer(AgentId),

    #[error("no free seat")]
    NoSeatAvailable,

    #[error("no free spawn cell")]
    NoSpawnAvailable,

    #[error("cannot spawn at {0}: cell is a wall, a seat, or already occupied")]
    SpawnBlocked(Cell),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl SimError {
    /// `true` for the conditions that only mean "try again next tick".
    pub fn is_spawn_skip(&self) -> bool {
        matches!(
            self,
            SimError::NoSeatAvailable | SimError::NoSpawnAvailable | SimError::SpawnBlocked(_)
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
