use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata feeds the CLI --version output and the client User-Agent
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
