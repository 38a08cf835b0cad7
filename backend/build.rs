use std::fs;
use std::path::Path;

const PLACEHOLDER_INDEX: &str = "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Admin</title></head>\n<body><p>The admin client has not been built. Run <code>trunk build</code> in <code>frontend/</code>.</p></body></html>\n";

fn main() {
    let out_dir = Path::new("static");
    let dist_dir = Path::new("../frontend/dist");

    if dist_dir.exists() {
        let _ = fs::remove_dir_all(out_dir);
        fs::create_dir_all(out_dir).unwrap();
        fs_extra::dir::copy(
            dist_dir,
            out_dir,
            &fs_extra::dir::CopyOptions::new().overwrite(true).copy_inside(true),
        )
            .unwrap();
    } else {
        // The shell is embedded at compile time, so keep a page to serve.
        let embedded = out_dir.join("dist");
        fs::create_dir_all(&embedded).unwrap();
        let index = embedded.join("index.html");
        if !index.exists() {
            fs::write(index, PLACEHOLDER_INDEX).unwrap();
        }
    }
    println!("cargo:rerun-if-changed=../frontend/dist");
}
