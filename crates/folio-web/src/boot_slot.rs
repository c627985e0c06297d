#![forbid(unsafe_code)]

//! Single-boot guard for the page runtime.

use core::cell::OnceCell;

/// Holds the one value a page may boot.
///
/// The first successful initialisation is kept; later calls get a clone of it
/// and `false` for `fresh`.
pub(crate) struct BootSlot<T> {
    slot: OnceCell<T>,
}

impl<T: Clone> BootSlot<T> {
    pub const fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Return the stored value, or run `init` and store its result.
    ///
    /// A failed `init` leaves the slot empty.
    pub fn get_or_try_init<E>(
        &self,
        init: impl FnOnce() -> Result<T, E>,
    ) -> Result<(T, bool), E> {
        if let Some(existing) = self.slot.get() {
            return Ok((existing.clone(), false));
        }
        let value = init()?;
        // `init` cannot reach this slot, so it is still empty here.
        let stored = self.slot.get_or_init(|| value);
        Ok((stored.clone(), true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn second_boot_reuses_first_value() {
        let slot = BootSlot::new();
        let mut builds = 0;

        let (first, fresh) = slot
            .get_or_try_init(|| {
                builds += 1;
                Ok::<_, ()>(Rc::new("runtime"))
            })
            .expect("first boot");
        assert!(fresh);

        let (second, fresh) = slot
            .get_or_try_init(|| {
                builds += 1;
                Ok::<_, ()>(Rc::new("other"))
            })
            .expect("second boot");
        assert!(!fresh);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(builds, 1);
    }

    #[test]
    fn failed_boot_can_be_retried() {
        let slot: BootSlot<u8> = BootSlot::new();
        assert_eq!(slot.get_or_try_init(|| Err("no window")), Err("no window"));
        assert_eq!(slot.get_or_try_init(|| Ok::<_, &str>(7)), Ok((7, true)));
        assert_eq!(slot.get_or_try_init(|| Ok::<_, &str>(9)), Ok((7, false)));
    }
}
