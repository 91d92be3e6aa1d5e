//! Boolean state flags of accessible objects.
//!
//! States travel as a packed bit vector of two 32-bit words. Change signals
//! name individual flags by keyword; the keyword table here is fixed at
//! compile time, and keywords outside it are ignored by consumers rather
//! than failing.

use serde::{Deserialize, Serialize};

/// Width of a state vector in 32-bit words.
pub const STATE_WORDS: usize = 2;

/// A boolean flag a remote object can assert.
///
/// The discriminant is the flag's position in the packed vector: word
/// `n / 32`, bit `n % 32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
#[allow(missing_docs, reason = "flag names are self-describing")]
pub enum State {
	Invalid = 0,
	Active,
	Armed,
	Busy,
	Checked,
	Collapsed,
	Defunct,
	Editable,
	Enabled,
	Expandable,
	Expanded,
	Focusable,
	Focused,
	HasTooltip,
	Horizontal,
	Iconified,
	Modal,
	MultiLine,
	Multiselectable,
	Opaque,
	Pressed,
	Resizable,
	Selectable,
	Selected,
	Sensitive,
	Showing,
	SingleLine,
	Stale,
	Transient,
	Vertical,
	Visible,
	/// The remote object asserts control over its own child list; cached
	/// child sequences of such objects are frozen from the mirror's
	/// perspective.
	ManagesDescendants,
	Indeterminate,
	Required,
	Truncated,
	Animated,
	InvalidEntry,
	SupportsAutocompletion,
	SelectableText,
	IsDefault,
	Visited,
}

impl State {
	/// Resolve a state keyword from the wire against the fixed table.
	///
	/// Senders spell multi-word keywords with either `-` or `_`
	/// separators; both are accepted. Unknown keywords yield `None`.
	#[must_use]
	pub fn from_keyword(keyword: &str) -> Option<Self> {
		let keyword = keyword.replace('-', "_");
		Some(match keyword.as_str() {
			"invalid" => Self::Invalid,
			"active" => Self::Active,
			"armed" => Self::Armed,
			"busy" => Self::Busy,
			"checked" => Self::Checked,
			"collapsed" => Self::Collapsed,
			"defunct" => Self::Defunct,
			"editable" => Self::Editable,
			"enabled" => Self::Enabled,
			"expandable" => Self::Expandable,
			"expanded" => Self::Expanded,
			"focusable" => Self::Focusable,
			"focused" => Self::Focused,
			"has_tooltip" => Self::HasTooltip,
			"horizontal" => Self::Horizontal,
			"iconified" => Self::Iconified,
			"modal" => Self::Modal,
			"multi_line" => Self::MultiLine,
			"multiselectable" => Self::Multiselectable,
			"opaque" => Self::Opaque,
			"pressed" => Self::Pressed,
			"resizable" => Self::Resizable,
			"selectable" => Self::Selectable,
			"selected" => Self::Selected,
			"sensitive" => Self::Sensitive,
			"showing" => Self::Showing,
			"single_line" => Self::SingleLine,
			"stale" => Self::Stale,
			"transient" => Self::Transient,
			"vertical" => Self::Vertical,
			"visible" => Self::Visible,
			"manages_descendants" => Self::ManagesDescendants,
			"indeterminate" => Self::Indeterminate,
			"required" => Self::Required,
			"truncated" => Self::Truncated,
			"animated" => Self::Animated,
			"invalid_entry" => Self::InvalidEntry,
			"supports_autocompletion" => Self::SupportsAutocompletion,
			"selectable_text" => Self::SelectableText,
			"is_default" => Self::IsDefault,
			"visited" => Self::Visited,
			_ => return None,
		})
	}

	/// Word and bit position of this flag in the packed vector.
	#[must_use]
	pub fn word_bit(self) -> (usize, u32) {
		let n = self as u32;
		((n / 32) as usize, n % 32)
	}
}

/// Packed bit vector of [`State`] flags, [`STATE_WORDS`] words wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSet([u32; STATE_WORDS]);

impl StateSet {
	/// The vector with no flags set.
	pub const EMPTY: StateSet = StateSet([0; STATE_WORDS]);

	/// Wrap the raw words as received off the wire.
	#[must_use]
	pub fn from_words(words: [u32; STATE_WORDS]) -> Self {
		Self(words)
	}

	/// The raw words.
	#[must_use]
	pub fn words(self) -> [u32; STATE_WORDS] {
		self.0
	}

	/// Whether `state` is set.
	#[must_use]
	pub fn contains(self, state: State) -> bool {
		let (word, bit) = state.word_bit();
		self.0[word] & (1 << bit) != 0
	}

	/// Set or clear `state`.
	pub fn set(&mut self, state: State, value: bool) {
		let (word, bit) = state.word_bit();
		if value {
			self.0[word] |= 1 << bit;
		} else {
			self.0[word] &= !(1 << bit);
		}
	}

	/// Whether no flag is set.
	#[must_use]
	pub fn is_empty(self) -> bool {
		self.0 == [0; STATE_WORDS]
	}
}
