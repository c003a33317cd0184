//! Byte-level state snapshots.
//!
//! A snapshot is a flat little-endian byte vector. Types participate by
//! implementing [`InSaveState`], usually through the derive macro in the
//! `save-state-macro` crate.

#[cfg(test)]
mod tests;

/// Sink a snapshot is serialized into.
pub struct SaveStateSerializer {
    pub data: Vec<u8>,
}

/// Cursor over a snapshot being restored.
pub struct SaveStateDeserializer<'a> {
    pub data: core::slice::Iter<'a, u8>,
}

impl<'a> SaveStateDeserializer<'a> {
    fn take(&mut self, n: usize) -> &'a [u8] {
        let slice = self.data.as_slice();
        if slice.len() < n {
            panic!("not enough data to deserialize");
        }
        if n > 0 {
            let _ = self.data.nth(n - 1);
        }
        &slice[..n]
    }
}

pub trait InSaveState: Sized {
    fn serialize(&self, state: &mut SaveStateSerializer);
    fn deserialize(&mut self, state: &mut SaveStateDeserializer);
}

macro_rules! impl_for_int {
    ($($t:ty),*) => {$(
        impl InSaveState for $t {
            fn serialize(&self, state: &mut SaveStateSerializer) {
                state.data.extend_from_slice(&self.to_le_bytes())
            }

            fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
                let bytes = state.take(core::mem::size_of::<$t>());
                *self = Self::from_le_bytes(bytes.try_into().unwrap());
            }
        }
    )*};
}

impl_for_int! { u8, u16, u32, u64, i8, i16, i32, i64 }

// usize is snapshotted at a fixed 8-byte width so snapshots stay
// portable between platforms.
impl InSaveState for usize {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        (*self as u64).serialize(state)
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        let mut v: u64 = 0;
        v.deserialize(state);
        *self = v as usize
    }
}

impl InSaveState for bool {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        u8::from(*self).serialize(state)
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        let mut v: u8 = 0;
        v.deserialize(state);
        *self = v != 0
    }
}

impl<const N: usize, T: InSaveState> InSaveState for [T; N] {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        for item in self.iter() {
            item.serialize(state)
        }
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        for item in self.iter_mut() {
            item.deserialize(state)
        }
    }
}

impl<T: InSaveState + Default> InSaveState for Option<T> {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        self.is_some().serialize(state);
        if let Some(v) = self {
            v.serialize(state)
        }
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        let mut present = false;
        present.deserialize(state);
        *self = if present {
            let mut v = T::default();
            v.deserialize(state);
            Some(v)
        } else {
            None
        }
    }
}

impl<T: InSaveState + Default> InSaveState for Vec<T> {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        self.len().serialize(state);
        for item in self.iter() {
            item.serialize(state)
        }
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        let mut n: usize = 0;
        n.deserialize(state);
        self.clear();
        self.reserve(n);
        for _ in 0..n {
            let mut item = T::default();
            item.deserialize(state);
            self.push(item)
        }
    }
}
