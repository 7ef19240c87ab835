use crate::document::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ModifyBytes {
        offset: usize,
        new_bytes: Vec<u8>,
        old_bytes: Vec<u8>,
    },
}

impl Command {
    pub fn apply(&self, document: &mut Document) {
        match self {
            Command::ModifyBytes {
                offset,
                new_bytes,
                old_bytes: _,
            } => write_bytes(&mut document.raw_data, *offset, new_bytes),
        }
    }

    pub fn undo(&self, document: &mut Document) {
        match self {
            Command::ModifyBytes {
                offset,
                new_bytes: _,
                old_bytes,
            } => write_bytes(&mut document.raw_data, *offset, old_bytes),
        }
    }
}

fn write_bytes(raw_data: &mut [u8], offset: usize, bytes: &[u8]) {
    let max_len = raw_data.len();
    let start = offset.min(max_len);
    let end = offset.saturating_add(bytes.len()).min(max_len);

    if start < end {
        raw_data[start..end].copy_from_slice(&bytes[..end - start]);
    }
}

#[derive(Debug, Default)]
pub struct UndoStack {
    commands: Vec<Command>,
    pointer: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        // If we are not at the end, truncate the future
        if self.pointer < self.commands.len() {
            self.commands.truncate(self.pointer);
        }
        self.commands.push(command);
        self.pointer += 1;
    }

    pub fn undo(&mut self, document: &mut Document) -> Option<String> {
        if self.pointer > 0 {
            self.pointer -= 1;
            let command = &self.commands[self.pointer];
            command.undo(document);
            Some("Undone".to_string())
        } else {
            None
        }
    }

    pub fn redo(&mut self, document: &mut Document) -> Option<String> {
        if self.pointer < self.commands.len() {
            let command = &self.commands[self.pointer];
            command.apply(document);
            self.pointer += 1;
            Some("Redone".to_string())
        } else {
            None
        }
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer < self.commands.len()
    }

    pub fn get_pointer(&self) -> usize {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
