use crate::games::types::{Color, Draw, Number};
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Source of wheel results.
///
/// The engine only ever asks for one draw per accepted wager, while the
/// account lock is held.
pub trait OutcomeSource: Send + Sync {
    fn draw(&self) -> Draw;
}

/// Uniform, independent draw of color and number from the thread RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOutcome;

impl OutcomeSource for RandomOutcome {
    fn draw(&self) -> Draw {
        let mut rng = rand::thread_rng();
        // Both arrays are non-empty constants
        let color = *Color::ALL.choose(&mut rng).unwrap_or(&Color::Red);
        let number = *Number::ALL.choose(&mut rng).unwrap_or(&Number::ALL[0]);
        Draw::new(color, number)
    }
}

/// Replays a fixed list of draws, then repeats the last one.
///
/// Used to force outcomes in tests and demos.
#[derive(Debug)]
pub struct ScriptedOutcome {
    queue: Mutex<VecDeque<Draw>>,
    fallback: Draw,
}

impl ScriptedOutcome {
    pub fn new(draws: impl IntoIterator<Item = Draw>) -> Self {
        let queue: VecDeque<Draw> = draws.into_iter().collect();
        let fallback = queue
            .back()
            .copied()
            .unwrap_or(Draw::new(Color::Red, Number::ALL[0]));
        Self {
            queue: Mutex::new(queue),
            fallback,
        }
    }

    /// Always produce the same draw
    pub fn always(draw: Draw) -> Self {
        Self::new([draw])
    }

    /// Draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or(0)
    }
}

impl OutcomeSource for ScriptedOutcome {
    fn draw(&self) -> Draw {
        match self.queue.lock() {
            Ok(mut queue) => queue.pop_front().unwrap_or(self.fallback),
            Err(_) => self.fallback,
        }
    }
}
