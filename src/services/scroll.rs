// src/services/scroll.rs

/// Viewport over the rendered transcript that sticks to the newest line.
///
/// `offset` counts lines from the top of the transcript. Following is paused
/// when the user scrolls up and resumes once the viewport touches the tail
/// again, or whenever a new message arrives.
#[derive(Debug, Clone)]
pub struct ScrollState {
    height: usize,
    offset: usize,
    follow_bottom: bool,
    seen_messages: usize,
}

impl ScrollState {
    pub fn new(height: usize) -> Self {
        Self { height: height.max(1), offset: 0, follow_bottom: true, seen_messages: 0 }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_following_bottom(&self) -> bool {
        self.follow_bottom
    }

    /// Called before every draw with the current message count.
    pub fn on_messages_changed(&mut self, message_count: usize) {
        if message_count != self.seen_messages {
            self.seen_messages = message_count;
            self.follow_bottom = true;
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
        self.follow_bottom = false;
    }

    pub fn scroll_down(&mut self, lines: usize, total_lines: usize) {
        self.offset = (self.offset + lines).min(max_offset(total_lines, self.height));
        if self.offset == max_offset(total_lines, self.height) {
            self.follow_bottom = true;
        }
    }

    /// Visible slice of `lines`, moving to the tail first when following.
    pub fn window<'a>(&mut self, lines: &'a [String]) -> &'a [String] {
        let max = max_offset(lines.len(), self.height);
        if self.follow_bottom {
            self.offset = max;
        } else {
            self.offset = self.offset.min(max);
        }
        let end = (self.offset + self.height).min(lines.len());
        &lines[self.offset..end]
    }
}

fn max_offset(total: usize, height: usize) -> usize {
    total.saturating_sub(height)
}
