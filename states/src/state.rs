use std::any::{Any, type_name};

use log::warn;

/// A plain value stored in [`StateCtx`](crate::StateCtx).
///
/// States are written by the UI (`ctx.update::<T>(..)`) or by commands through an
/// [`Updater`](crate::Updater). Every write marks dependent computes dirty and notifies
/// subscribers of `T`.
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Replace `self` with a value sent through an `Updater`.
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for states: downcast and overwrite.
pub fn state_assign_impl<T: State>(this: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *this = *value,
        Err(_) => warn!("state assign ignored: payload is not a {}", type_name::<T>()),
    }
}

/// Current wall-clock time as seen by business code.
///
/// Kept in the context instead of calling `Utc::now()` directly so tests can pin it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    now: chrono::DateTime<chrono::Utc>,
}

impl Time {
    pub fn fixed(now: chrono::DateTime<chrono::Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.now
    }

    pub fn set(&mut self, now: chrono::DateTime<chrono::Utc>) {
        self.now = now;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            now: chrono::Utc::now(),
        }
    }
}

impl AsRef<chrono::DateTime<chrono::Utc>> for Time {
    fn as_ref(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.now
    }
}

impl State for Time {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn assign_box_replaces_value() {
        let mut time = Time::fixed(Utc.timestamp_opt(0, 0).unwrap());
        let later = Utc.timestamp_opt(60, 0).unwrap();

        time.assign_box(Box::new(Time::fixed(later)));
        assert_eq!(time.now(), later);
    }

    #[test]
    fn assign_box_ignores_foreign_payload() {
        let start = Utc.timestamp_opt(10, 0).unwrap();
        let mut time = Time::fixed(start);

        time.assign_box(Box::new(42_u32));
        assert_eq!(time.now(), start);
    }
}
