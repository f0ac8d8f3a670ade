//! Persisted form of a stack and location hints.
//!
//! Binary layout, big-endian:
//!
//! ```text
//! [has_children: u8] ( [count: i32] [id: i32] * count [selected: i32] )?
//! ```
//!
//! The bracketed group is only present when `has_children` is non-zero.

use bytes::{Buf, BufMut};

use crate::error::{DockError, DockResult};

/// Ordered child ids and the selected index of a stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackLayout {
    pub children: Vec<i32>,
    pub selected: i32,
}

impl StackLayout {
    pub fn new(children: Vec<i32>, selected: i32) -> Self {
        Self { children, selected }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append the binary form to `out`.
    pub fn encode_into(&self, out: &mut impl BufMut) {
        if self.children.is_empty() {
            out.put_u8(0);
            return;
        }
        out.put_u8(1);
        out.put_i32(self.children.len() as i32);
        for &id in &self.children {
            out.put_i32(id);
        }
        out.put_i32(self.selected);
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + 4 * (self.children.len() + 2));
        self.encode_into(&mut out);
        out
    }

    /// Read one layout from the front of `data`.
    pub fn decode_from(data: &mut impl Buf) -> DockResult<Self> {
        need(data.remaining(), 1)?;
        if data.get_u8() == 0 {
            return Ok(Self::default());
        }
        need(data.remaining(), 4)?;
        let count = data.get_i32();
        if count < 0 {
            return Err(DockError::InvalidLayout(format!(
                "negative child count {count}"
            )));
        }
        let count = count as usize;
        need(data.remaining(), count.saturating_mul(4).saturating_add(4))?;
        let children = (0..count).map(|_| data.get_i32()).collect();
        let selected = data.get_i32();
        Ok(Self { children, selected })
    }

    pub fn decode(mut data: &[u8]) -> DockResult<Self> {
        Self::decode_from(&mut data)
    }
}

fn need(remaining: usize, needed: usize) -> DockResult<()> {
    if remaining < needed {
        return Err(DockError::LayoutTruncated { needed, remaining });
    }
    Ok(())
}

/// Location hint: the index of a panel in a stack, and optionally where it
/// sits inside the stack found at that index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackProperty {
    index: usize,
    successor: Option<Box<StackProperty>>,
}

impl StackProperty {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            successor: None,
        }
    }

    pub fn with_successor(mut self, successor: StackProperty) -> Self {
        self.successor = Some(Box::new(successor));
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn successor(&self) -> Option<&StackProperty> {
        self.successor.as_deref()
    }

    /// Number of nesting levels, including this one.
    pub fn depth(&self) -> usize {
        1 + self.successor().map_or(0, StackProperty::depth)
    }
}
