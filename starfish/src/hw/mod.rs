pub mod clock;
pub mod led;
pub mod pins;
pub mod pwm;
pub mod usart;

pub use clock::SysTickClock;
pub use led::Led;
pub use pins::BoardPins;
pub use pwm::PwmBank;
pub use usart::Usart;
