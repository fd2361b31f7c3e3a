// Set cfg flags depending on release channel
#[rustversion::nightly]
fn channel() {
    println!("cargo:rustc-cfg=nightly");
}

#[rustversion::not(nightly)]
fn channel() {}

fn main() {
    channel();
    println!("cargo:rustc-check-cfg=cfg(nightly)");
}
