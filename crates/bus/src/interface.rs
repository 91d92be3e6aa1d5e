//! Capability interfaces exposed by remote objects.

use bitflags::bitflags;

bitflags! {
	/// The set of capability interfaces a remote object implements.
	///
	/// Interfaces arrive on the wire as fully qualified names; the mirror
	/// only tracks which of the known capabilities are present. Names it
	/// does not know are dropped during conversion.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct InterfaceSet: u32 {
		/// Core accessible-object queries.
		const ACCESSIBLE = 1 << 0;
		/// Invokable actions.
		const ACTION = 1 << 1;
		/// Application-level queries on a process root.
		const APPLICATION = 1 << 2;
		/// Batched descendant queries.
		const COLLECTION = 1 << 3;
		/// On-screen geometry.
		const COMPONENT = 1 << 4;
		/// Document-level attributes.
		const DOCUMENT = 1 << 5;
		/// Mutable text content.
		const EDITABLE_TEXT = 1 << 6;
		/// An individual hyperlink.
		const HYPERLINK = 1 << 7;
		/// Text with embedded links.
		const HYPERTEXT = 1 << 8;
		/// Image content descriptions.
		const IMAGE = 1 << 9;
		/// Child selection management.
		const SELECTION = 1 << 10;
		/// Tabular structure queries.
		const TABLE = 1 << 11;
		/// Read-only text content.
		const TEXT = 1 << 12;
		/// A bounded numeric value.
		const VALUE = 1 << 13;
	}
}

impl InterfaceSet {
	/// Map one wire interface name to its capability. Unknown names yield
	/// `None`.
	#[must_use]
	pub fn from_wire_name(name: &str) -> Option<Self> {
		Some(match name {
			"org.a11y.atspi.Accessible" => Self::ACCESSIBLE,
			"org.a11y.atspi.Action" => Self::ACTION,
			"org.a11y.atspi.Application" => Self::APPLICATION,
			"org.a11y.atspi.Collection" => Self::COLLECTION,
			"org.a11y.atspi.Component" => Self::COMPONENT,
			"org.a11y.atspi.Document" => Self::DOCUMENT,
			"org.a11y.atspi.EditableText" => Self::EDITABLE_TEXT,
			"org.a11y.atspi.Hyperlink" => Self::HYPERLINK,
			"org.a11y.atspi.Hypertext" => Self::HYPERTEXT,
			"org.a11y.atspi.Image" => Self::IMAGE,
			"org.a11y.atspi.Selection" => Self::SELECTION,
			"org.a11y.atspi.Table" => Self::TABLE,
			"org.a11y.atspi.Text" => Self::TEXT,
			"org.a11y.atspi.Value" => Self::VALUE,
			_ => return None,
		})
	}

	/// Collect the known capabilities out of a list of wire names,
	/// dropping names outside the table.
	#[must_use]
	pub fn from_names<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		names
			.into_iter()
			.filter_map(|name| Self::from_wire_name(name.as_ref()))
			.fold(Self::empty(), |set, capability| set | capability)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_names_are_dropped() {
		let set = InterfaceSet::from_names([
			"org.a11y.atspi.Accessible",
			"org.a11y.atspi.Component",
			"com.example.Bespoke",
		]);
		assert_eq!(set, InterfaceSet::ACCESSIBLE | InterfaceSet::COMPONENT);
	}
}
