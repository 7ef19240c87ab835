//! Headless model of the "Operations" dialog: one operand field per
//! operator, routed through a message dispatch table. Rendering belongs to
//! whatever front end hosts it.

use crate::document::{Document, DocumentError};
use crate::operation::{OperandWidth, OperatorKind};
use crate::parse::parse_operand;
use log::debug;
use std::collections::HashMap;

#[derive(Debug, PartialEq)]
pub enum DialogResult {
    KeepOpen,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    FieldChanged,
    SelectOperator,
    SetWidth,
    SetSigned,
    Ok,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    FieldChanged(OperatorKind, String),
    SelectOperator(OperatorKind),
    SetWidth(OperandWidth),
    SetSigned(bool),
    Ok,
    Cancel,
}

impl DialogEvent {
    pub fn message_id(&self) -> MessageId {
        match self {
            DialogEvent::FieldChanged(..) => MessageId::FieldChanged,
            DialogEvent::SelectOperator(_) => MessageId::SelectOperator,
            DialogEvent::SetWidth(_) => MessageId::SetWidth,
            DialogEvent::SetSigned(_) => MessageId::SetSigned,
            DialogEvent::Ok => MessageId::Ok,
            DialogEvent::Cancel => MessageId::Cancel,
        }
    }
}

pub type Handler = fn(&mut OperationsDialog, &DialogEvent, &mut Document) -> DialogResult;

pub struct OperationsDialog {
    fields: HashMap<OperatorKind, String>,
    pub selected: OperatorKind,
    pub width: OperandWidth,
    pub signed: bool,
    pub status_message: Option<String>,
    handlers: HashMap<MessageId, Handler>,
}

impl OperationsDialog {
    pub fn new(width: OperandWidth, signed: bool) -> Self {
        let handlers: HashMap<MessageId, Handler> = HashMap::from([
            (MessageId::FieldChanged, Self::on_field_changed as Handler),
            (MessageId::SelectOperator, Self::on_select_operator as Handler),
            (MessageId::SetWidth, Self::on_set_width as Handler),
            (MessageId::SetSigned, Self::on_set_signed as Handler),
            (MessageId::Ok, Self::on_ok as Handler),
            (MessageId::Cancel, Self::on_cancel as Handler),
        ]);

        Self {
            fields: OperatorKind::all()
                .iter()
                .map(|kind| (*kind, String::new()))
                .collect(),
            selected: OperatorKind::Or,
            width,
            signed,
            status_message: None,
            handlers,
        }
    }

    pub fn field(&self, kind: OperatorKind) -> &str {
        self.fields.get(&kind).map(String::as_str).unwrap_or_default()
    }

    pub fn handle_event(&mut self, event: &DialogEvent, document: &mut Document) -> DialogResult {
        match self.handlers.get(&event.message_id()).copied() {
            Some(handler) => handler(self, event, document),
            None => DialogResult::KeepOpen,
        }
    }

    fn on_field_changed(&mut self, event: &DialogEvent, _: &mut Document) -> DialogResult {
        if let DialogEvent::FieldChanged(kind, text) = event {
            self.fields.insert(*kind, text.clone());
            // Typing into a field picks its operator.
            self.selected = *kind;
        }
        DialogResult::KeepOpen
    }

    fn on_select_operator(&mut self, event: &DialogEvent, _: &mut Document) -> DialogResult {
        if let DialogEvent::SelectOperator(kind) = event {
            self.selected = *kind;
        }
        DialogResult::KeepOpen
    }

    fn on_set_width(&mut self, event: &DialogEvent, _: &mut Document) -> DialogResult {
        if let DialogEvent::SetWidth(width) = event {
            self.width = *width;
        }
        DialogResult::KeepOpen
    }

    fn on_set_signed(&mut self, event: &DialogEvent, _: &mut Document) -> DialogResult {
        if let DialogEvent::SetSigned(signed) = event {
            self.signed = *signed;
        }
        DialogResult::KeepOpen
    }

    fn on_ok(&mut self, _: &DialogEvent, document: &mut Document) -> DialogResult {
        let kind = self.selected;
        let operand = match parse_operand(self.field(kind), self.width, self.signed) {
            Ok(operand) => operand,
            Err(e) => {
                self.status_message = Some(format!("{}: {}", kind, e));
                return DialogResult::KeepOpen;
            }
        };

        match document.apply_to_selection(kind, operand) {
            Ok(count) => {
                debug!("Operations dialog applied {} {}", kind, operand);
                self.status_message = Some(format!("{} applied to {} element(s)", kind, count));
                DialogResult::Close
            }
            Err(DocumentError::NoSelection) => {
                self.status_message = Some("Nothing selected".to_string());
                DialogResult::KeepOpen
            }
            Err(DocumentError::Operation(e)) => {
                self.status_message = Some(format!("{}: {}", kind, e));
                DialogResult::KeepOpen
            }
        }
    }

    fn on_cancel(&mut self, _: &DialogEvent, _: &mut Document) -> DialogResult {
        self.status_message = None;
        DialogResult::Close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::ByteRange;

    #[test]
    fn test_field_change_selects_operator() {
        let mut document = Document::new();
        let mut dialog = OperationsDialog::new(OperandWidth::Byte, false);

        let result = dialog.handle_event(
            &DialogEvent::FieldChanged(OperatorKind::Shl, "2".to_string()),
            &mut document,
        );
        assert_eq!(result, DialogResult::KeepOpen);
        assert_eq!(dialog.selected, OperatorKind::Shl);
        assert_eq!(dialog.field(OperatorKind::Shl), "2");
        assert_eq!(dialog.field(OperatorKind::Div), "");
    }

    #[test]
    fn test_ok_applies_selected_field() {
        let mut document = Document::from_bytes(vec![0x01, 0x02, 0x03]);
        document.select(ByteRange::new(0, 2)).unwrap();
        let mut dialog = OperationsDialog::new(OperandWidth::Byte, false);

        dialog.handle_event(
            &DialogEvent::FieldChanged(OperatorKind::Add, "10".to_string()),
            &mut document,
        );
        dialog.handle_event(
            &DialogEvent::FieldChanged(OperatorKind::Xor, "FF".to_string()),
            &mut document,
        );
        dialog.handle_event(
            &DialogEvent::SelectOperator(OperatorKind::Add),
            &mut document,
        );

        assert_eq!(
            dialog.handle_event(&DialogEvent::Ok, &mut document),
            DialogResult::Close
        );
        assert_eq!(document.raw_data, vec![0x11, 0x12, 0x03]);
        assert_eq!(
            dialog.status_message.as_deref(),
            Some("ADD applied to 2 element(s)")
        );
    }

    #[test]
    fn test_ok_failures_keep_dialog_open() {
        let mut document = Document::from_bytes(vec![0x10, 0x20]);
        let mut dialog = OperationsDialog::new(OperandWidth::Byte, false);

        dialog.handle_event(
            &DialogEvent::FieldChanged(OperatorKind::Div, "0".to_string()),
            &mut document,
        );
        assert_eq!(
            dialog.handle_event(&DialogEvent::Ok, &mut document),
            DialogResult::KeepOpen
        );
        assert_eq!(dialog.status_message.as_deref(), Some("Nothing selected"));

        document.select(ByteRange::new(0, 2)).unwrap();
        assert_eq!(
            dialog.handle_event(&DialogEvent::Ok, &mut document),
            DialogResult::KeepOpen
        );
        assert_eq!(
            dialog.status_message.as_deref(),
            Some("DIV: division by zero")
        );

        dialog.handle_event(
            &DialogEvent::FieldChanged(OperatorKind::Div, "zz".to_string()),
            &mut document,
        );
        dialog.handle_event(&DialogEvent::Ok, &mut document);
        assert_eq!(dialog.status_message.as_deref(), Some("DIV: invalid operand"));
        assert_eq!(document.raw_data, vec![0x10, 0x20]);
    }

    #[test]
    fn test_width_and_signedness_events() {
        let mut document = Document::from_bytes(vec![0x00, 0x80]);
        document.select(ByteRange::new(0, 2)).unwrap();
        let mut dialog = OperationsDialog::new(OperandWidth::Byte, false);

        dialog.handle_event(&DialogEvent::SetWidth(OperandWidth::Word), &mut document);
        dialog.handle_event(&DialogEvent::SetSigned(true), &mut document);
        dialog.handle_event(
            &DialogEvent::FieldChanged(OperatorKind::Shr, "#4".to_string()),
            &mut document,
        );
        assert_eq!(
            dialog.handle_event(&DialogEvent::Ok, &mut document),
            DialogResult::Close
        );
        // 0x8000 little-endian, arithmetic shift right by 4.
        assert_eq!(document.raw_data, vec![0x00, 0xF8]);
    }

    #[test]
    fn test_cancel_closes() {
        let mut document = Document::new();
        let mut dialog = OperationsDialog::new(OperandWidth::Byte, false);
        assert_eq!(
            dialog.handle_event(&DialogEvent::Cancel, &mut document),
            DialogResult::Close
        );
    }
}
