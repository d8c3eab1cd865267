use crate::io::ReportSink;
use itertools::Itertools;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    subtimers: SubTimersMap,
}

impl InnerTimer {
    fn reset(&mut self) {
        self.start = None;
        self.elapsed = Duration::ZERO;
        self.subtimers.clear();
    }

    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[derive(Debug, Default)]
struct SubTimersMap(HashMap<&'static str, InnerTimer>);

impl Deref for SubTimersMap {
    type Target = HashMap<&'static str, InnerTimer>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for SubTimersMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl SubTimersMap {
    fn reset_subtimer(&mut self, key: &'static str) {
        let t = self.entry(key).or_default();
        t.reset();
    }

    fn start_subtimer(&mut self, key: &'static str) {
        let t = self.0.entry(key).or_default();
        t.start();
    }

    fn find(&self, path: &[&'static str]) -> Option<&InnerTimer> {
        let (first, rest) = path.split_first()?;
        let mut timer = self.get(first)?;
        for key in rest {
            timer = timer.subtimers.get(key)?;
        }
        Some(timer)
    }

    pub fn total_time(&self) -> Duration {
        self.values()
            .fold(Duration::ZERO, |acc, t| acc + t.elapsed())
    }

    // keys are printed in sorted order so that reports are reproducible
    pub fn print(&self, depth: u8, out: &mut impl ReportSink) -> std::io::Result<()> {
        for (key, val) in self.iter().sorted_by_key(|(k, _)| **k) {
            let tabs = format!("{: <1$}", "", 4 * depth as usize);
            out.emit_line(&format!("{}{:} : {:?}", tabs, *key, val.elapsed))?;
            val.subtimers.print(depth + 1, out)?;
        }
        Ok(())
    }
}

#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    subtimers: SubTimersMap,
}

impl Timers {
    fn mut_active_timer(&mut self) -> Option<&mut InnerTimer> {
        let (first, rest) = self.stack.split_first()?;

        //first one gets special treatment since self is not
        //an InnerTimer and a common trait would be overkill
        let mut active_timer = self.subtimers.get_mut(first)?;

        for key in rest {
            active_timer = active_timer.subtimers.get_mut(key)?;
        }
        Some(active_timer)
    }

    pub fn reset_timer(&mut self, key: &'static str) {
        self.subtimers.reset_subtimer(key);
    }

    pub fn start_as_current(&mut self, key: &'static str) {
        //starts a timer with name "str" as the current timer

        let active_timer = self.mut_active_timer();

        if let Some(active) = active_timer {
            // child of current active timer
            active.subtimers.start_subtimer(key);
        } else {
            // nothing active, create one at root
            self.subtimers.start_subtimer(key);
        }

        //append to timer call stack
        self.stack.push(key);
    }

    pub fn stop_current(&mut self) {
        //stops the current timer.  A stop with nothing
        //running is ignored.
        if let Some(active) = self.mut_active_timer() {
            active.stop();
        }

        //remove from timer call stack
        self.stack.pop();
    }

    /// Accumulated time of the timer at `path`, e.g.
    /// `&["path A", "decompose"]`.  `None` if it was never started.
    pub fn elapsed(&self, path: &[&'static str]) -> Option<Duration> {
        self.subtimers.find(path).map(|t| t.elapsed())
    }

    pub fn total_time(&self) -> Duration {
        self.subtimers.total_time()
    }

    pub fn print(&self, out: &mut impl ReportSink) -> std::io::Result<()> {
        self.subtimers.print(0, out)
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{ConfigurablePrintTarget, PrintTarget};

    #[test]
    fn test_nested_timers() {
        let mut timers = Timers::default();

        timeit! {timers => "outer"; {
            timeit!{timers => "inner"; {
                std::thread::sleep(Duration::from_millis(2));
            }}
        }}

        let outer = timers.elapsed(&["outer"]).unwrap();
        let inner = timers.elapsed(&["outer", "inner"]).unwrap();
        assert!(inner >= Duration::from_millis(2));
        assert!(outer >= inner);
        assert_eq!(timers.total_time(), outer);
        assert!(timers.elapsed(&["inner"]).is_none());
        assert!(timers.elapsed(&[]).is_none());

        timers.reset_timer("outer");
        assert_eq!(timers.elapsed(&["outer"]), Some(Duration::ZERO));
        assert!(timers.elapsed(&["outer", "inner"]).is_none());
    }

    #[test]
    fn test_timer_print() {
        let mut timers = Timers::default();
        timeit! {timers => "b"; {}}
        timeit! {timers => "a"; {
            timeit!{timers => "c"; {}}
        }}

        let mut out = PrintTarget::default();
        out.print_to_buffer();
        timers.print(&mut out).unwrap();
        let text = out.get_print_buffer().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("a : "));
        assert!(lines[1].starts_with("    c : "));
        assert!(lines[2].starts_with("b : "));
    }
}
