//! Edge-triggered input

/// Fires once when a held input goes from released to pressed.
///
/// Polled once per frame, so a key held for many frames (or auto-repeating)
/// still yields a single trigger.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeTrigger {
    held: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current pressed state; true only on the rising edge
    pub fn update(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.held;
        self.held = pressed;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sustained_press_fires_once() {
        let mut trigger = EdgeTrigger::new();
        let fired: Vec<bool> = [false, true, true, true, false, true]
            .into_iter()
            .map(|p| trigger.update(p))
            .collect();
        assert_eq!(fired, [false, true, false, false, false, true]);
    }
}
