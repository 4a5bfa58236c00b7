pub mod qr_code;
