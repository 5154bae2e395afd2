//! # Panic Capture Module / Panic 捕获模块
//!
//! Runs solution code so that a panic becomes a `TargetError::Panicked`
//! carrying the message and the location inside the solution, instead of
//! unwinding through the harness.
//!
//! 运行解答代码，将 panic 转换为携带消息和解答内部位置的
//! `TargetError::Panicked`，而不是让其穿过测试框架继续展开。

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::core::solution::TargetError;

static HOOK: Once = Once::new();

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
    static PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Installs the process-wide hook once. Panics on a thread inside a guarded
/// call only record their location; all others go to the previous hook.
fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARD_DEPTH.try_with(Cell::get).unwrap_or(0) == 0 {
                previous(info);
                return;
            }
            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
            let _ = PANIC_LOCATION.try_with(|slot| *slot.borrow_mut() = location);
        }));
    });
}

/// Calls `call`, turning a panic into `TargetError::Panicked`.
///
/// The panic is not printed; the harness reports it once, with only the frame
/// that raised it.
pub fn invoke_guarded<R>(call: impl FnOnce() -> Result<R, TargetError>) -> Result<R, TargetError> {
    install_hook();

    GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let outcome = panic::catch_unwind(AssertUnwindSafe(call));
    GUARD_DEPTH.with(|depth| depth.set(depth.get() - 1));

    match outcome {
        Ok(result) => result,
        Err(payload) => Err(TargetError::Panicked {
            message: panic_message(payload.as_ref()),
            location: PANIC_LOCATION.with(|slot| slot.borrow_mut().take()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_and_err_pass_through() {
        assert_eq!(invoke_guarded(|| Ok::<_, TargetError>(3)), Ok(3));
        assert_eq!(
            invoke_guarded(|| Err::<(), _>(TargetError::failed("nope"))),
            Err(TargetError::Failed("nope".to_string()))
        );
    }

    #[test]
    fn test_panic_becomes_target_error() {
        let values: Vec<i32> = Vec::new();
        let result: Result<i32, TargetError> = invoke_guarded(|| Ok(values[values.len() + 2]));
        match result {
            Err(TargetError::Panicked { message, .. }) => assert!(message.contains("index out of bounds")),
            other => panic!("expected a captured panic, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_guards_report_the_inner_panic() {
        let outer: Result<(), TargetError> = invoke_guarded(|| {
            let inner: Result<(), TargetError> = invoke_guarded(|| panic!("inner"));
            assert!(matches!(inner, Err(TargetError::Panicked { ref location, .. }) if location.is_some()));
            Ok(())
        });
        assert_eq!(outer, Ok(()));
        assert_eq!(GUARD_DEPTH.with(Cell::get), 0);
    }

    #[test]
    fn test_concurrent_guards_keep_their_locations() {
        let workers: Vec<_> = (0..8)
            .map(|worker| {
                std::thread::spawn(move || {
                    (0..200)
                        .filter(|i| (i + worker) % 2 == 0)
                        .map(|i| invoke_guarded(|| -> Result<(), TargetError> { panic!("worker {worker} call {i}") }))
                        .filter(|result| {
                            !matches!(result, Err(TargetError::Panicked { location: Some(_), .. }))
                        })
                        .count()
                })
            })
            .collect();

        for worker in workers {
            assert_eq!(worker.join().unwrap(), 0);
        }
    }
}
