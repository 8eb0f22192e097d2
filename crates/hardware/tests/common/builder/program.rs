use copperv_core::isa::encode::InstructionBuilder;

pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

pub fn b() -> InstructionBuilder {
    InstructionBuilder::new()
}

/// `ebreak`, the usual terminator of a test snippet.
pub fn halt() -> u32 {
    b().ebreak().build()
}

/// Appends `ebreak` to `body`.
pub fn snippet(body: &[u32]) -> Vec<u32> {
    let mut words = body.to_vec();
    words.push(halt());
    words
}
