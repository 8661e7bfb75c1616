// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// The application is assembled in lib.rs so the mobile entry point can share it.

fn main() {
    camera_gallery_lib::run();
}
