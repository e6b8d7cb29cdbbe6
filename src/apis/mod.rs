pub mod iloveqatar;
