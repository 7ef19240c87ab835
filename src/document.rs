use crate::applier::OperatorApplier;
use crate::commands::{Command, UndoStack};
use crate::operation::{ByteRange, OpError, Operand, OperatorKind};
use anyhow::Context;
use log::{info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("no bytes selected")]
    NoSelection,
    #[error(transparent)]
    Operation(#[from] OpError),
}

/// An editable binary buffer with a selection and undo history.
#[derive(Debug, Default)]
pub struct Document {
    pub file_path: Option<PathBuf>,
    pub raw_data: Vec<u8>,
    pub selection: Option<ByteRange>,
    pub applier: OperatorApplier,
    pub undo_stack: UndoStack,
    pub last_saved_pointer: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(raw_data: Vec<u8>) -> Self {
        Self {
            raw_data,
            ..Self::default()
        }
    }

    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw_data =
            std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        info!("Loaded {} byte(s) from {:?}", raw_data.len(), path);
        Ok(Self {
            file_path: Some(path.to_path_buf()),
            raw_data,
            ..Self::default()
        })
    }

    pub fn save(&mut self) -> anyhow::Result<()> {
        let path = self
            .file_path
            .clone()
            .context("Document has no file path")?;
        self.write_to(&path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref().to_path_buf();
        self.write_to(&path)?;
        self.file_path = Some(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, &self.raw_data)
            .with_context(|| format!("Failed to write {:?}", path))?;
        self.last_saved_pointer = self.undo_stack.get_pointer();
        info!("Saved {} byte(s) to {:?}", self.raw_data.len(), path);
        Ok(())
    }

    pub fn select(&mut self, range: ByteRange) -> Result<(), OpError> {
        range.to_index_range(self.raw_data.len())?;
        self.selection = Some(range);
        Ok(())
    }

    /// Applies the operator and records the change for undo. Nothing is
    /// recorded when the bytes come out unchanged.
    pub fn apply_operation(
        &mut self,
        range: ByteRange,
        kind: OperatorKind,
        operand: Operand,
    ) -> Result<usize, OpError> {
        let index_range = range.to_index_range(self.raw_data.len())?;
        let old_bytes = self.raw_data[index_range.clone()].to_vec();

        let applier = self.applier;
        let modified = applier
            .apply(&mut self.raw_data, range, kind, operand)
            .inspect_err(|e| warn!("{} rejected: {}", kind, e))?;

        let new_bytes = self.raw_data[index_range.clone()].to_vec();
        if new_bytes != old_bytes {
            self.push_command(Command::ModifyBytes {
                offset: index_range.start,
                new_bytes,
                old_bytes,
            });
        }
        Ok(modified)
    }

    pub fn apply_to_selection(
        &mut self,
        kind: OperatorKind,
        operand: Operand,
    ) -> Result<usize, DocumentError> {
        let range = self.selection.ok_or(DocumentError::NoSelection)?;
        Ok(self.apply_operation(range, kind, operand)?)
    }

    pub fn push_command(&mut self, command: Command) {
        if self.undo_stack.get_pointer() < self.last_saved_pointer {
            self.last_saved_pointer = usize::MAX;
        }
        self.undo_stack.push(command);
    }

    pub fn undo_last_command(&mut self) -> String {
        let mut stack = std::mem::take(&mut self.undo_stack);
        let msg = if let Some(msg) = stack.undo(self) {
            msg
        } else {
            "Nothing to undo".to_string()
        };
        self.undo_stack = stack;
        msg
    }

    pub fn redo_last_command(&mut self) -> String {
        let mut stack = std::mem::take(&mut self.undo_stack);
        let msg = if let Some(msg) = stack.redo(self) {
            msg
        } else {
            "Nothing to redo".to_string()
        };
        self.undo_stack = stack;
        msg
    }

    pub fn is_dirty(&self) -> bool {
        self.undo_stack.get_pointer() != self.last_saved_pointer
    }
}
