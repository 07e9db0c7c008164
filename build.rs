use shadow_rs::ShadowBuilder;

fn main() {
    // Version, commit and build time shown by `sms-dispatch --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
