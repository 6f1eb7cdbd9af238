//! Menu and screen flow.
//!
//! A pure state machine over the screens a front end renders:
//!
//! ```text
//! MainMenu ─→ SizeSelect ─→ InGame ─→ GameOver
//!     │                       ↑  │        │
//!     └──→ LoadMenu ──────────┘  └────────┴─→ MainMenu
//! ```
//!
//! Every operation checks the current screen and returns a typed error when
//! it doesn't apply, so front ends can wire buttons without tracking state
//! themselves. Save-listing failures follow log-and-continue: the load menu
//! opens with whatever could be read.

use thiserror::Error;

use crate::core::BoardSize;
use crate::game::{GameError, GameSession, TurnEvent};
use crate::save::{SaveError, SaveStore};

/// Board sizes offered on the size-selection screen.
///
/// All have an even cell count; odd boards stay API-supported but are not
/// offered in the menu.
pub const PLAYABLE_SIZES: &[BoardSize] = &[
    BoardSize::new(2, 2),
    BoardSize::new(2, 3),
    BoardSize::new(3, 4),
    BoardSize::new(4, 4),
    BoardSize::new(4, 5),
    BoardSize::new(5, 6),
    BoardSize::new(6, 6),
];

/// Which screen the front end should render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Title screen: new game / load game.
    MainMenu,
    /// Pick a board size from [`PLAYABLE_SIZES`].
    SizeSelect,
    /// Pick a save to load or delete.
    LoadMenu {
        /// Sorted save names, refreshed when the menu opens.
        saves: Vec<String>,
    },
    /// A game is in progress.
    InGame,
    /// The board was cleared.
    GameOver,
}

impl Screen {
    /// Short name for error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Screen::MainMenu => "main menu",
            Screen::SizeSelect => "size select",
            Screen::LoadMenu { .. } => "load menu",
            Screen::InGame => "game",
            Screen::GameOver => "game over",
        }
    }
}

/// Errors from driving the flow.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("cannot {operation} from the {screen} screen")]
    WrongScreen {
        operation: &'static str,
        screen: &'static str,
    },

    #[error("board size {size} is not offered")]
    SizeNotPlayable { size: BoardSize },

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

/// The whole game seen from the front end: current screen, current session,
/// and the save store.
#[derive(Debug)]
pub struct GameFlow {
    store: SaveStore,
    screen: Screen,
    session: Option<GameSession>,
}

impl GameFlow {
    /// Start at the main menu.
    #[must_use]
    pub fn new(store: SaveStore) -> Self {
        Self {
            store,
            screen: Screen::MainMenu,
            session: None,
        }
    }

    /// The screen to render.
    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The game in progress, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// The save store backing the load menu.
    #[must_use]
    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    // === Menu navigation ===

    /// Open the size-selection screen (from the main menu).
    pub fn open_size_select(&mut self) -> Result<(), FlowError> {
        self.require(Screen::MainMenu, "open size select")?;
        self.screen = Screen::SizeSelect;
        Ok(())
    }

    /// Open the load menu (from the main menu), listing available saves.
    pub fn open_load_menu(&mut self) -> Result<(), FlowError> {
        self.require(Screen::MainMenu, "open load menu")?;
        self.screen = Screen::LoadMenu {
            saves: self.store.list(),
        };
        Ok(())
    }

    /// Return to the main menu from anywhere, dropping any unsaved game.
    pub fn back_to_menu(&mut self) {
        if self.session.take().is_some() {
            log::info!("returning to menu, discarding session");
        }
        self.screen = Screen::MainMenu;
    }

    // === Starting and loading ===

    /// Start a new game with a size from [`PLAYABLE_SIZES`].
    pub fn start_game(&mut self, size: BoardSize, seed: u64) -> Result<(), FlowError> {
        self.require(Screen::SizeSelect, "start a game")?;
        if !PLAYABLE_SIZES.contains(&size) {
            return Err(FlowError::SizeNotPlayable { size });
        }

        self.session = Some(GameSession::new(size, seed));
        self.screen = Screen::InGame;
        Ok(())
    }

    /// Load the named save (from the load menu).
    ///
    /// A save of an already-cleared board opens on the game-over screen.
    pub fn load_game(&mut self, name: &str) -> Result<(), FlowError> {
        self.require_load_menu("load a game")?;

        let save = self.store.load(name)?;
        let session = GameSession::from_save(&save)?;
        self.screen = if session.is_won() {
            Screen::GameOver
        } else {
            Screen::InGame
        };
        self.session = Some(session);
        Ok(())
    }

    /// Delete the named save and refresh the load menu listing.
    pub fn delete_save(&mut self, name: &str) -> Result<(), FlowError> {
        self.require_load_menu("delete a save")?;

        self.store.delete(name)?;
        self.screen = Screen::LoadMenu {
            saves: self.store.list(),
        };
        Ok(())
    }

    // === In-game ===

    /// Save the game in progress under `name`.
    pub fn save_game(&mut self, name: &str) -> Result<(), FlowError> {
        self.require(Screen::InGame, "save the game")?;
        let session = self.session.as_ref().ok_or(FlowError::WrongScreen {
            operation: "save the game",
            screen: self.screen.name(),
        })?;

        self.store.save(name, &session.to_save())?;
        Ok(())
    }

    /// Flip the card at `index`, moving to the game-over screen on a win.
    pub fn flip_card(&mut self, index: usize) -> Result<TurnEvent, FlowError> {
        self.require(Screen::InGame, "flip a card")?;
        let session = self.session.as_mut().ok_or(FlowError::WrongScreen {
            operation: "flip a card",
            screen: self.screen.name(),
        })?;

        let event = session.flip_card(index)?;
        if let TurnEvent::MatchFound { won: true, .. } = event {
            self.screen = Screen::GameOver;
        }
        Ok(event)
    }

    /// Flip a mismatched pair back down after the front end's delay.
    pub fn resolve_mismatch(&mut self) -> Result<(), FlowError> {
        self.require(Screen::InGame, "resolve a mismatch")?;
        let session = self.session.as_mut().ok_or(FlowError::WrongScreen {
            operation: "resolve a mismatch",
            screen: self.screen.name(),
        })?;

        session.resolve_mismatch()?;
        Ok(())
    }

    /// Re-deal the same board size (from the game or game-over screen).
    pub fn restart(&mut self, seed: u64) -> Result<(), FlowError> {
        if !matches!(self.screen, Screen::InGame | Screen::GameOver) {
            return Err(FlowError::WrongScreen {
                operation: "restart",
                screen: self.screen.name(),
            });
        }
        let session = self.session.as_mut().ok_or(FlowError::WrongScreen {
            operation: "restart",
            screen: self.screen.name(),
        })?;

        session.restart(seed);
        self.screen = Screen::InGame;
        Ok(())
    }

    fn require(&self, expected: Screen, operation: &'static str) -> Result<(), FlowError> {
        if std::mem::discriminant(&self.screen) == std::mem::discriminant(&expected) {
            Ok(())
        } else {
            Err(FlowError::WrongScreen {
                operation,
                screen: self.screen.name(),
            })
        }
    }

    fn require_load_menu(&self, operation: &'static str) -> Result<(), FlowError> {
        if matches!(self.screen, Screen::LoadMenu { .. }) {
            Ok(())
        } else {
            Err(FlowError::WrongScreen {
                operation,
                screen: self.screen.name(),
            })
        }
    }
}
