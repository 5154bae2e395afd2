//! # Standard I/O Shim Module / 标准输入输出兼容模块
//!
//! Stream solutions normally receive their input and output handles as
//! arguments. Entry points that cannot take handles read and write through
//! this module instead: outside a test it forwards to the process's real
//! stdin/stdout, inside a stream test it serves the test's input block and
//! captures the output.
//!
//! 流式解答通常以参数形式接收输入输出句柄。无法接收句柄的入口函数改为通过
//! 此模块读写：在测试之外它转发到进程真实的标准输入输出，在流式测试中它提供
//! 测试的输入块并捕获输出。

use std::cell::RefCell;
use std::io::{self, BufRead, Cursor, Read, Write};
use std::marker::PhantomData;

struct Redirect {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

thread_local! {
    static REDIRECTS: RefCell<Vec<Redirect>> = const { RefCell::new(Vec::new()) };
}

/// Keeps stdin/stdout redirected for the current thread until dropped.
/// Dropping restores the previous streams, also while unwinding.
///
/// 在被丢弃之前保持当前线程的标准输入输出重定向。
/// 丢弃时（包括 panic 展开时）恢复之前的流。
#[must_use = "the redirect ends when the guard is dropped"]
pub struct RedirectGuard {
    finished: bool,
    _thread_bound: PhantomData<*const ()>,
}

/// Redirects this thread's stdin to `input` and captures its stdout.
pub fn redirect(input: &str) -> RedirectGuard {
    REDIRECTS.with(|stack| {
        stack.borrow_mut().push(Redirect {
            input: Cursor::new(input.as_bytes().to_vec()),
            output: Vec::new(),
        })
    });
    RedirectGuard {
        finished: false,
        _thread_bound: PhantomData,
    }
}

impl RedirectGuard {
    /// Ends the redirect and returns everything written while it was active.
    pub fn finish(mut self) -> String {
        self.finished = true;
        let redirect = REDIRECTS.with(|stack| stack.borrow_mut().pop());
        redirect
            .map(|r| String::from_utf8_lossy(&r.output).into_owned())
            .unwrap_or_default()
    }
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        if !self.finished {
            REDIRECTS.with(|stack| stack.borrow_mut().pop());
        }
    }
}

pub fn is_redirected() -> bool {
    REDIRECTS.with(|stack| !stack.borrow().is_empty())
}

/// Reads one line without its line terminator; `None` at end of input.
pub fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    let read = REDIRECTS.with(|stack| match stack.borrow_mut().last_mut() {
        Some(redirect) => redirect.input.read_line(&mut line),
        None => io::stdin().lock().read_line(&mut line),
    })?;

    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Reads the rest of the input.
pub fn read_all() -> io::Result<String> {
    let mut text = String::new();
    REDIRECTS.with(|stack| match stack.borrow_mut().last_mut() {
        Some(redirect) => redirect.input.read_to_string(&mut text),
        None => io::stdin().lock().read_to_string(&mut text),
    })?;
    Ok(text)
}

/// Writes `text` to the redirected output, or to the real stdout.
pub fn write(text: &str) {
    REDIRECTS.with(|stack| match stack.borrow_mut().last_mut() {
        Some(redirect) => redirect.output.extend_from_slice(text.as_bytes()),
        None => {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(text.as_bytes());
            let _ = stdout.flush();
        }
    });
}

/// Like `print!`, through the stdio shim.
#[macro_export]
macro_rules! out {
    ($($arg:tt)*) => {
        $crate::infra::stdio::write(&format!($($arg)*))
    };
}

/// Like `println!`, through the stdio shim.
#[macro_export]
macro_rules! outln {
    () => {
        $crate::infra::stdio::write("\n")
    };
    ($($arg:tt)*) => {{
        $crate::infra::stdio::write(&format!($($arg)*));
        $crate::infra::stdio::write("\n");
    }};
}
