/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Test helpers.

pub(crate) fn uniform(a: f64, b: f64) -> f64 { ::rand::random::<f64>() * (b - a) + a }

pub(crate) fn random_vec(n: usize) -> Vec<f64> { (0..n).map(|_| uniform(-1.0, 1.0)).collect() }

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&a, &b)| a * b).sum()
}

thread_local! {
    static CAPTURED: std::cell::RefCell<Option<Vec<String>>> = std::cell::RefCell::new(None);
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::Level::Warn
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            CAPTURED.with(|c| {
                if let Some(messages) = c.borrow_mut().as_mut() {
                    messages.push(record.args().to_string());
                }
            });
        }
    }

    fn flush(&self) {}
}

/// Run `f`, collecting the warnings this thread logs meanwhile.
pub(crate) fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    static LOGGER: CaptureLogger = CaptureLogger;
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("a logger was already installed");
        log::set_max_level(log::LevelFilter::Warn);
    });

    CAPTURED.with(|c| *c.borrow_mut() = Some(vec![]));
    let out = f();
    let messages = CAPTURED.with(|c| c.borrow_mut().take()).unwrap_or_default();
    (out, messages)
}
