use std::fmt;

use rust_fsm::state_machine;

/*
 * Idle
 * Round
 *    Waiting for the buttons to change color
 *    Ready for input once the timer fired
 *    Showing the outcome before the next round
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub GameFsm(Idle)

    Idle => {
        StartRound => Waiting
    },
    Waiting => {
        TimerFired => ReadyForInput,
        EarlyPress => DisplayDelay,
    },
    ReadyForInput => {
        Press => DisplayDelay
    },
    DisplayDelay => {
        StartRound => Waiting
    }
}

impl fmt::Display for GameFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
