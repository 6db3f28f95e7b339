/// Unicode partial block characters for smooth progress bars
const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Render a bar for a fraction in 0.0..=1.0 using partial block characters
pub fn render_bar(fraction: f64, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let fraction = fraction.clamp(0.0, 1.0);
    let filled_width = fraction * width as f64;
    let full_blocks = filled_width.floor() as usize;
    let partial = ((filled_width - full_blocks as f64) * 8.0).round() as usize;

    let mut bar = String::with_capacity(width * 3); // Unicode chars can be multi-byte

    // Full blocks
    for _ in 0..full_blocks.min(width) {
        bar.push(BLOCKS[8]);
    }

    // Partial block
    if full_blocks < width && partial > 0 {
        bar.push(BLOCKS[partial.min(8)]);
    }

    // Pad to width
    let current_len = bar.chars().count();
    for _ in current_len..width {
        bar.push(' ');
    }

    bar
}
