//! Teclado virtual por /dev/uinput: reproduce localmente los atajos de la
//! presentación (Ctrl+Alt+N / Ctrl+Alt+B) en vez de mandarlos por ssh.

use std::time::Duration;
use uinput::device::Device;
use uinput::event::keyboard;

use crate::actions::GestureAction;
use crate::executor::{ActionRunner, ExecutorError};

pub struct HidExecutor {
    dev: Device,
}

impl HidExecutor {
    pub fn new() -> Result<Self, uinput::Error> {
        let dev = uinput::default()?
            .name("quirodedos-hid")?
            .event(uinput::event::Keyboard::All)?
            .create()?;

        Ok(HidExecutor { dev })
    }

    fn sync(&mut self) -> Result<(), uinput::Error> {
        self.dev.synchronize()
    }

    fn press(&mut self, key: keyboard::Key) -> Result<(), uinput::Error> {
        self.dev.press(&keyboard::Keyboard::Key(key))?;
        self.sync()?;
        std::thread::sleep(Duration::from_millis(10));
        Ok(())
    }

    fn release(&mut self, key: keyboard::Key) -> Result<(), uinput::Error> {
        self.dev.release(&keyboard::Keyboard::Key(key))?;
        self.sync()
    }

    fn ctrl_alt_combo(&mut self, key: keyboard::Key) -> Result<(), uinput::Error> {
        self.press(keyboard::Key::LeftControl)?;
        self.press(keyboard::Key::LeftAlt)?;
        self.press(key)?;
        self.release(key)?;
        self.release(keyboard::Key::LeftAlt)?;
        self.release(keyboard::Key::LeftControl)
    }
}

impl ActionRunner for HidExecutor {
    fn run(&mut self, action: GestureAction) -> Result<(), ExecutorError> {
        match action {
            GestureAction::SlideNext => self.ctrl_alt_combo(keyboard::Key::N)?,
            GestureAction::SlideBack => self.ctrl_alt_combo(keyboard::Key::B)?,
            // El volumen va por el mezclador, no por teclado
            GestureAction::VolumeMin | GestureAction::VolumeMax => {
                return Err(ExecutorError::Unsupported(action))
            }
        }
        Ok(())
    }
}
