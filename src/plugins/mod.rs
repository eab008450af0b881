pub mod iciba;
