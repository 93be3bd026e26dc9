fn main() {
    // Forwards the ESP-IDF link arguments when building for the device;
    // prints nothing on host builds.
    embuild::espidf::sysenv::output();
}
