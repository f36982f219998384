//! The serving layer between viewers and rooms.
//!
//! `GameTable` resolves a viewer's route to a room, hands out session
//! identities, forwards clicks and resets to the room's engine, and
//! announces every accepted change on the event bus.
//!
//! A viewer's role is looked up through the engine on every call rather
//! than cached. Only `connect`, `connect_as` and `play` seat a session;
//! rendering and role queries are read-only and show an unseated session
//! as a spectator. After a role-clearing reset the first session to play
//! takes X, and every new X or O seat is announced on the bus.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tictoc::core::{EngineConfig, Role};
//! use tictoc::events::LocalBus;
//! use tictoc::table::GameTable;
//!
//! let bus = Arc::new(LocalBus::new());
//! let table = GameTable::new(EngineConfig::default().with_seed(1), Arc::clone(&bus));
//!
//! let alice = table.connect("/room42");
//! let bob = table.connect("/room42");
//! assert_eq!(table.role(&alice), Role::X);
//! assert_eq!(table.role(&bob), Role::O);
//!
//! assert!(table.play(&alice, 4));
//! assert_eq!(table.render(&bob).status.to_string(), "Your turn");
//! ```

use std::sync::Mutex;
use tracing::debug;

use crate::core::{EngineConfig, GameRng, Role, SessionId, StreamKind};
use crate::events::{EventBus, RoomEvent, RoomEventKind};
use crate::engine::GameEngine;
use crate::rooms::{RoomHandle, RoomId, RoomRegistry};
use crate::view::BoardView;

/// A connected viewer: which room, and who they are.
#[derive(Clone, Debug)]
pub struct Viewer {
    room: RoomHandle,
    session: SessionId,
}

impl Viewer {
    pub fn room(&self) -> &RoomId {
        self.room.id()
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }
}

/// Registry plus event bus plus session minting.
pub struct GameTable<B: EventBus> {
    registry: RoomRegistry,
    bus: B,
    tokens: Mutex<GameRng>,
}

impl<B: EventBus> GameTable<B> {
    pub fn new(config: EngineConfig, bus: B) -> Self {
        let tokens = match config.seed {
            Some(seed) => GameRng::new(seed).for_stream(StreamKind::SessionTokens, ""),
            None => GameRng::from_entropy(),
        };
        Self {
            registry: RoomRegistry::new(config),
            bus,
            tokens: Mutex::new(tokens),
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// First contact from a route: mint a session and seat it in the room.
    pub fn connect(&self, route: &str) -> Viewer {
        let session = {
            let mut tokens = self
                .tokens
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            SessionId::generate(&mut tokens)
        };
        self.connect_as(route, session)
    }

    /// Seat a caller-supplied session in the room named by `route`.
    pub fn connect_as(&self, route: &str, session: SessionId) -> Viewer {
        let id = RoomId::from_route(route, &self.registry.config().default_room);
        let room = self.registry.get_or_create(&id);
        let seat = room.with(|engine| Seat::take(engine, &session));
        debug!(room = %id, session = %session, role = %seat.role, "Viewer connected");
        let viewer = Viewer { room, session };
        self.announce(&viewer, seat);
        viewer
    }

    /// The viewer's current role. A session the room has forgotten is a
    /// spectator until it plays.
    pub fn role(&self, viewer: &Viewer) -> Role {
        viewer.room.with(|engine| current_role(engine, &viewer.session))
    }

    /// Click on cell `index`. Returns whether the move was accepted.
    ///
    /// A session the room has forgotten is seated first.
    pub fn play(&self, viewer: &Viewer, index: usize) -> bool {
        let (seat, outcome) = viewer.room.with(|engine| {
            let seat = Seat::take(engine, &viewer.session);
            (seat, engine.try_move(seat.role, index))
        });
        self.announce(viewer, seat);

        match outcome {
            Ok(record) => {
                self.bus
                    .publish(RoomEvent::new(viewer.room().clone(), RoomEventKind::Moved(record)));
                true
            }
            Err(_) => false,
        }
    }

    /// Reset the room's game. Only the viewer currently seated as X may reset.
    pub fn reset(&self, viewer: &Viewer) -> bool {
        let done = viewer.room.with(|engine| {
            if engine.role_of(&viewer.session) != Some(Role::X) {
                return false;
            }
            engine.reset();
            true
        });

        if done {
            self.bus
                .publish(RoomEvent::new(viewer.room().clone(), RoomEventKind::Reset));
        } else {
            debug!(room = %viewer.room(), session = %viewer.session, "Reset refused");
        }
        done
    }

    /// Render the room from this viewer's seat. Never changes the room.
    pub fn render(&self, viewer: &Viewer) -> BoardView {
        let (snapshot, role) = viewer
            .room
            .with(|engine| (engine.snapshot(), current_role(engine, &viewer.session)));
        BoardView::render(&snapshot, role)
    }

    fn announce(&self, viewer: &Viewer, seat: Seat) {
        if seat.is_new && !seat.role.is_spectator() {
            debug!(room = %viewer.room(), session = %viewer.session, role = %seat.role, "Seated");
            self.bus
                .publish(RoomEvent::new(viewer.room().clone(), RoomEventKind::Seated(seat.role)));
        }
    }
}

/// Result of seating a session.
#[derive(Clone, Copy, Debug)]
struct Seat {
    role: Role,
    is_new: bool,
}

impl Seat {
    fn take(engine: &mut GameEngine, session: &SessionId) -> Self {
        let is_new = engine.role_of(session).is_none();
        Self {
            role: engine.assign_role(session),
            is_new,
        }
    }
}

fn current_role(engine: &GameEngine, session: &SessionId) -> Role {
    engine.role_of(session).unwrap_or(Role::Spectator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ResetPolicy, Symbol};
    use crate::events::LocalBus;
    use std::sync::Arc;

    fn table(config: EngineConfig) -> (GameTable<Arc<LocalBus>>, Arc<LocalBus>) {
        let bus = Arc::new(LocalBus::new());
        (GameTable::new(config, Arc::clone(&bus)), bus)
    }

    #[test]
    fn test_connect_seats_in_order() {
        let (table, _) = table(EngineConfig::default().with_seed(3));
        let a = table.connect("/r");
        let b = table.connect("/r");
        let c = table.connect("/r");

        assert_ne!(a.session(), b.session());
        assert_eq!(table.role(&a), Role::X);
        assert_eq!(table.role(&b), Role::O);
        assert_eq!(table.role(&c), Role::Spectator);
    }

    #[test]
    fn test_empty_route_goes_to_default_room() {
        let (table, _) = table(EngineConfig::default().with_default_room("lobby"));
        let viewer = table.connect("/");
        assert_eq!(viewer.room().as_str(), "lobby");
    }

    #[test]
    fn test_play_publishes_only_accepted_moves() {
        let (table, bus) = table(EngineConfig::default());
        let a = table.connect("/r");
        let b = table.connect("/r");
        let rx = bus.subscribe(a.room());

        assert!(!table.play(&b, 0));
        assert!(rx.try_recv().is_err());

        assert!(table.play(&a, 0));
        match rx.try_recv().unwrap().kind {
            RoomEventKind::Moved(record) => {
                assert_eq!(record.placed, 0);
                assert_eq!(record.by, Symbol::X);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_only_x_may_reset() {
        let (table, bus) = table(EngineConfig::default());
        let a = table.connect("/r");
        let b = table.connect("/r");
        let rx = bus.subscribe(a.room());
        assert!(table.play(&a, 0));
        let _ = rx.try_recv();

        assert!(!table.reset(&b));
        assert!(rx.try_recv().is_err());

        assert!(table.reset(&a));
        assert_eq!(rx.try_recv().unwrap().kind, RoomEventKind::Reset);
        assert!(table.render(&a).cells.iter().all(|cell| cell.label.is_empty()));
    }

    #[test]
    fn test_roles_reassigned_after_reset() {
        let (table, bus) = table(EngineConfig::default());
        let a = table.connect("/r");
        let b = table.connect("/r");
        let rx = bus.subscribe(a.room());
        assert!(table.reset(&a));
        assert_eq!(rx.try_recv().unwrap().kind, RoomEventKind::Reset);

        // Forgotten sessions look like spectators until they act
        assert_eq!(table.role(&a), Role::Spectator);
        assert_eq!(table.role(&b), Role::Spectator);

        // b plays first after the reset and takes X
        assert!(table.play(&b, 4));
        assert_eq!(rx.try_recv().unwrap().kind, RoomEventKind::Seated(Role::X));
        assert!(matches!(rx.try_recv().unwrap().kind, RoomEventKind::Moved(_)));
        assert_eq!(table.role(&b), Role::X);

        assert!(table.play(&a, 0));
        assert_eq!(rx.try_recv().unwrap().kind, RoomEventKind::Seated(Role::O));
        assert_eq!(table.role(&a), Role::O);
    }

    #[test]
    fn test_render_after_reset_does_not_seat() {
        let (table, bus) = table(EngineConfig::default());
        let x = table.connect("/r");
        let _o = table.connect("/r");
        let watcher = table.connect("/r");
        let rx = bus.subscribe(x.room());
        assert!(table.reset(&x));
        let _ = rx.try_recv();

        // The spectator redraws first, which must not hand them X
        let view = table.render(&watcher);
        assert_eq!(view.role, Role::Spectator);
        assert!(!view.can_reset);
        assert_eq!(table.role(&watcher), Role::Spectator);
        assert!(!table.reset(&watcher));
        assert!(rx.try_recv().is_err());
        assert!(x.room.snapshot().roles.is_empty());

        // The next player to act still gets X
        assert!(table.play(&x, 0));
        assert_eq!(rx.try_recv().unwrap().kind, RoomEventKind::Seated(Role::X));
    }

    #[test]
    fn test_connect_announces_new_players_only() {
        let (table, bus) = table(EngineConfig::default());
        let rx = bus.subscribe(&RoomId::from("r"));
        let _a = table.connect("/r");
        let _b = table.connect("/r");
        let _c = table.connect("/r");
        let _again = table.connect_as("/r", SessionId::from("late"));

        let kinds: Vec<_> = rx.try_iter().map(|event| event.kind).collect();
        assert_eq!(
            kinds,
            vec![RoomEventKind::Seated(Role::X), RoomEventKind::Seated(Role::O)]
        );
    }

    #[test]
    fn test_roles_kept_after_reset() {
        let (table, _) = table(EngineConfig::default().with_reset_policy(ResetPolicy::KeepRoles));
        let a = table.connect("/r");
        let b = table.connect("/r");
        assert!(table.reset(&a));

        assert_eq!(table.role(&b), Role::O);
        assert_eq!(table.role(&a), Role::X);
    }

    #[test]
    fn test_connect_as_is_idempotent() {
        let (table, _) = table(EngineConfig::default());
        let first = table.connect_as("/r", SessionId::from("alice"));
        let again = table.connect_as("/r", SessionId::from("alice"));
        assert_eq!(table.role(&first), Role::X);
        assert_eq!(table.role(&again), Role::X);
    }
}
