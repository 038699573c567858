use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::warn;

use crate::error::Error;

/// Shared flag a host uses to abort a running pipeline.
#[derive(Clone, Debug, Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<(), Error> {
        if self.is_cancelled() {
            Err(Error::Aborted)
        } else {
            Ok(())
        }
    }
}

/// State threaded through the lexer and parser of a single run.
#[derive(Debug, Default)]
pub struct Context {
    cancel: Cancel,
    strict: bool,
    diagnostics: Vec<String>,
}

impl Context {
    pub fn new(cancel: Cancel) -> Self {
        Self {
            cancel,
            ..Default::default()
        }
    }

    /// In strict mode an illegal character fails the lexer
    /// instead of being skipped.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn cancel(&self) -> &Cancel {
        &self.cancel
    }

    pub fn check(&self) -> Result<(), Error> {
        self.cancel.check()
    }

    pub fn warn(&mut self, msg: String) {
        warn!("{msg}");
        self.diagnostics.push(msg);
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_shared_between_clones() {
        let cancel = Cancel::new();
        let ctx = Context::new(cancel.clone());
        assert!(ctx.check().is_ok());
        cancel.cancel();
        assert_eq!(ctx.check(), Err(Error::Aborted));
    }

    #[test]
    fn warnings_are_collected() {
        let mut ctx = Context::default();
        ctx.warn("first".to_string());
        ctx.warn("second".to_string());
        assert_eq!(ctx.diagnostics(), ["first", "second"]);
        assert!(!ctx.is_strict());
    }
}
