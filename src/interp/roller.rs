use crate::common::*;
use rand::Rng;

pub type DefaultRoller = rand::rngs::ThreadRng;

/// Source of individual die results. Blanket-implemented for any
/// [`rand::Rng`], so a seeded generator can be injected for reproducible
/// evaluation.
pub trait Roller {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt;
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        self.gen_range(1..=sides.get())
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;

#[cfg(test)]
mod step {
    use super::*;

    /// Deterministic roller walking upward from an initial value, wrapping
    /// at the requested number of sides.
    pub(crate) struct StepRoller {
        current: UInt,
        step: UInt,
    }

    impl StepRoller {
        pub fn new(initial: UInt, step: UInt) -> Self {
            Self {
                current: initial,
                step,
            }
        }
    }

    impl Roller for StepRoller {
        fn roll(&mut self, sides: NonZeroUInt) -> UInt {
            let ret = (self.current - 1) % sides.get() + 1;
            self.current += self.step;
            ret
        }
    }

    #[test]
    fn test_step_roller_wraps() {
        let mut roller = StepRoller::new(10, 1);
        let sides = NonZeroUInt::new(6).unwrap();
        assert_eq!(roller.roll(sides), 4);
        assert_eq!(roller.roll(sides), 5);
        assert_eq!(roller.roll(sides), 6);
        assert_eq!(roller.roll(sides), 1);
    }
}
