use cafe_core::{AgentId, ItemId};
use thiserror::Error;

use crate::CustomerState;

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("{id}: cannot {event} while {state}")]
    InvalidEvent {
        id:    AgentId,
        event: &'static str,
        state: CustomerState,
    },

    #[error("{id}: ordered {expected}, was served {got}")]
    WrongItem { id: AgentId, expected: ItemId, got: ItemId },

    #[error("{0} has no order to serve")]
    NoOrder(AgentId),

    #[error("customer configuration error: {0}")]
    Config(String),

    #[error("menu parse error: {0}")]
    Menu(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CustomerResult<T> = Result<T, CustomerError>;
