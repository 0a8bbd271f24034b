use super::Listeners;
use crate::constants::{MAP_MOVE, MAP_MOVE_END, MAP_MOVE_START};
use crate::session::{Session, WebHandler};
use std::rc::Rc;

pub fn wire(listeners: &mut Listeners, session: &Rc<Session>) {
    let events: [(&'static str, fn(&mut WebHandler)); 3] = [
        (MAP_MOVE_START, |h| h.on_map_move_start()),
        (MAP_MOVE, |h| h.on_map_move()),
        (MAP_MOVE_END, |h| h.on_map_move_end()),
    ];
    for (name, action) in events {
        let s = Rc::downgrade(session);
        listeners.on_map(name, move |_| {
            if let Some(session) = s.upgrade() {
                session.with(action);
            }
        });
    }
}
