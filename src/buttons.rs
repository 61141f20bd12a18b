/// Which claim control is on screen.
///
/// `Unavailable` hides every control. It is where the page starts and where it
/// stays when the claim link cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Unavailable,
    Loading,
    MakeClaim,
    ViewClaim,
    Invalidated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonVisibility {
    pub loading: bool,
    pub make_claim: bool,
    pub view_claim: bool,
    pub invalidated: bool,
}

impl ButtonState {
    pub fn visibility(self) -> ButtonVisibility {
        let hidden = ButtonVisibility::default();
        match self {
            ButtonState::Unavailable => hidden,
            ButtonState::Loading => ButtonVisibility {
                loading: true,
                ..hidden
            },
            ButtonState::MakeClaim => ButtonVisibility {
                make_claim: true,
                ..hidden
            },
            ButtonState::ViewClaim => ButtonVisibility {
                view_claim: true,
                ..hidden
            },
            ButtonState::Invalidated => ButtonVisibility {
                invalidated: true,
                ..hidden
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonController {
    state: ButtonState,
}

impl ButtonController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn visibility(&self) -> ButtonVisibility {
        self.state.visibility()
    }

    /// Replaces the current state; the previous one has no bearing on the
    /// result.
    pub fn set_state(&mut self, next: ButtonState) -> ButtonVisibility {
        if self.state != next {
            log::info!("claim buttons: {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        self.visibility()
    }
}
