//! problem::gate — pause/resume run gate.
//!
//! Purpose
//! -------
//! Implement pause/resume as an explicit state machine that is separate from
//! the lock protecting the parameter data. Strategies pass through the gate
//! before each iteration and around every write-back; `pause` flips the gate
//! and `resume` reopens it.
//!
//! Key behaviors
//! -------------
//! - [`RunGate::pass`] runs a write-back while holding the gate mutex, so a
//!   concurrent `pause` returns only after the in-flight write-back has
//!   completed, and no further write-back starts until `resume`.
//! - [`RunGate::wait_until_running`] parks a strategy at the top of an
//!   iteration while paused.
//! - Misuse is reported, not fatal: a second `pause` yields
//!   [`OptError::AlreadyPaused`], an unmatched `resume` yields
//!   [`OptError::NotPaused`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Lock order is always gate first, then the problem's data lock.
//! - The gate never holds the data lock itself; `pass` closures acquire it.
use std::sync::{Condvar, Mutex, MutexGuard};

use crate::optimization::errors::{OptError, OptResult};

/// State of the run gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

#[derive(Debug)]
pub struct RunGate {
    state: Mutex<RunState>,
    reopened: Condvar,
}

impl RunGate {
    pub fn new() -> Self {
        Self { state: Mutex::new(RunState::Running), reopened: Condvar::new() }
    }

    pub fn state(&self) -> OptResult<RunState> {
        Ok(*self.lock()?)
    }

    /// Close the gate. Blocks while a write-back is in flight.
    ///
    /// # Errors
    /// - [`OptError::AlreadyPaused`] if the gate is already closed.
    pub fn pause(&self) -> OptResult<()> {
        let mut state = self.lock()?;
        if *state == RunState::Paused {
            return Err(OptError::AlreadyPaused);
        }
        *state = RunState::Paused;
        Ok(())
    }

    /// Reopen the gate and wake every waiting strategy.
    ///
    /// # Errors
    /// - [`OptError::NotPaused`] if the gate is open.
    pub fn resume(&self) -> OptResult<()> {
        let mut state = self.lock()?;
        if *state == RunState::Running {
            return Err(OptError::NotPaused);
        }
        *state = RunState::Running;
        self.reopened.notify_all();
        Ok(())
    }

    /// Reopen the gate regardless of its state (used by cancellation).
    pub fn release(&self) -> OptResult<()> {
        let mut state = self.lock()?;
        *state = RunState::Running;
        self.reopened.notify_all();
        Ok(())
    }

    /// Block until the gate is open.
    pub fn wait_until_running(&self) -> OptResult<()> {
        let guard = self.lock()?;
        let _guard = self.wait_open(guard)?;
        Ok(())
    }

    /// Run `write_back` once the gate is open, holding the gate for its
    /// whole duration.
    pub fn pass<R>(&self, write_back: impl FnOnce() -> OptResult<R>) -> OptResult<R> {
        let guard = self.lock()?;
        let guard = self.wait_open(guard)?;
        let result = write_back();
        drop(guard);
        result
    }

    fn lock(&self) -> OptResult<MutexGuard<'_, RunState>> {
        self.state.lock().map_err(|_| OptError::LockPoisoned { what: "run gate" })
    }

    fn wait_open<'a>(
        &self, guard: MutexGuard<'a, RunState>,
    ) -> OptResult<MutexGuard<'a, RunState>> {
        self.reopened
            .wait_while(guard, |state| *state == RunState::Paused)
            .map_err(|_| OptError::LockPoisoned { what: "run gate" })
    }
}

impl Default for RunGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        thread,
        time::Duration,
    };

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - State transitions and misuse errors of pause/resume.
    // - Blocking of `pass` while paused and wake-up on resume.
    //
    // They intentionally DO NOT cover:
    // - Interaction with the problem's data lock (see `problem::shared`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Double pause and unmatched resume are reported as errors instead of
    // deadlocking.
    //
    // Given
    // -----
    // - A fresh gate.
    //
    // Expect
    // ------
    // - `resume` → `NotPaused`; `pause` → Ok; `pause` → `AlreadyPaused`;
    //   `resume` → Ok.
    fn misuse_is_reported() {
        let gate = RunGate::new();

        assert_eq!(gate.resume().unwrap_err(), OptError::NotPaused);
        gate.pause().expect("first pause succeeds");
        assert_eq!(gate.pause().unwrap_err(), OptError::AlreadyPaused);
        gate.resume().expect("resume after pause succeeds");
        assert_eq!(gate.state().unwrap(), RunState::Running);
    }

    #[test]
    // Purpose
    // -------
    // A write-back attempted while paused waits for `resume`.
    //
    // Given
    // -----
    // - A paused gate and a thread calling `pass`.
    //
    // Expect
    // ------
    // - The closure has not run after a short sleep.
    // - It runs after `resume`.
    fn pass_blocks_until_resume() {
        let gate = RunGate::new();
        let ran = AtomicBool::new(false);
        gate.pause().unwrap();

        thread::scope(|s| {
            let handle = s.spawn(|| {
                gate.pass(|| {
                    ran.store(true, Ordering::SeqCst);
                    Ok(())
                })
            });
            thread::sleep(Duration::from_millis(50));
            assert!(!ran.load(Ordering::SeqCst));
            gate.resume().unwrap();
            handle.join().unwrap().unwrap();
        });

        assert!(ran.load(Ordering::SeqCst));
    }
}
