//! [`Scheduler`] over `requestAnimationFrame` and `setTimeout`.

use crate::tasks::TaskTable;
use geolink_core::{Scheduler, TaskId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

enum Handle {
    Frame(i32),
    Timeout(i32),
}

struct Pending {
    handle: Handle,
    _callback: Closure<dyn FnMut()>,
}

pub struct WebScheduler {
    window: web::Window,
    next: u64,
    fire: Rc<dyn Fn(TaskId)>,
    tasks: Rc<RefCell<TaskTable<Pending>>>,
}

impl WebScheduler {
    /// `fire` is invoked with the task id once its wake-up elapses.
    pub fn new(fire: impl Fn(TaskId) + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        Ok(Self {
            window,
            next: 0,
            fire: Rc::new(fire),
            tasks: Rc::default(),
        })
    }

    fn arm(
        &mut self,
        start: impl FnOnce(&web::Window, &js_sys::Function) -> Result<Handle, JsValue>,
    ) -> TaskId {
        self.next += 1;
        let id = TaskId(self.next);

        let tasks: Weak<RefCell<TaskTable<Pending>>> = Rc::downgrade(&self.tasks);
        let fire = self.fire.clone();
        let callback = Closure::wrap(Box::new(move || {
            if let Some(tasks) = tasks.upgrade() {
                // this closure is retired but not freed; earlier ones are done
                let stale = tasks.borrow_mut().retire(id);
                drop(stale);
            }
            fire(id);
        }) as Box<dyn FnMut()>);

        match start(&self.window, callback.as_ref().unchecked_ref()) {
            Ok(handle) => {
                self.tasks.borrow_mut().insert(
                    id,
                    Pending {
                        handle,
                        _callback: callback,
                    },
                );
            }
            Err(e) => log::warn!("[sched] could not schedule task {}: {:?}", id.0, e),
        }
        id
    }

    fn release(&self, pending: Pending) {
        match pending.handle {
            Handle::Frame(h) => {
                _ = self.window.cancel_animation_frame(h);
            }
            Handle::Timeout(h) => self.window.clear_timeout_with_handle(h),
        }
    }
}

impl Scheduler for WebScheduler {
    fn request_frame(&mut self) -> TaskId {
        self.arm(|w, f| w.request_animation_frame(f).map(Handle::Frame))
    }

    fn schedule_after(&mut self, delay: Duration) -> TaskId {
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        self.arm(|w, f| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(f, ms)
                .map(Handle::Timeout)
        })
    }

    fn cancel(&mut self, task: TaskId) {
        let pending = self.tasks.borrow_mut().cancel(task);
        if let Some(pending) = pending {
            self.release(pending);
        }
    }
}

impl Drop for WebScheduler {
    fn drop(&mut self) {
        let pending = self.tasks.borrow_mut().drain_live();
        for p in pending {
            self.release(p);
        }
    }
}
